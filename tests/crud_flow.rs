use chrono::Utc;
use product_order_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        accounts::CreateAccountRequest,
        categories::{CreateCategoryRequest, UpdateCategoryRequest},
        customers::CreateCustomerRequest,
        orders::{CreateOrderRequest, OrderLineRequest},
        products::CreateProductRequest,
        reviews::CreateReviewRequest,
    },
    entity::{Categories, Customers, Orders, Products, Reviews, categories, customers},
    error::AppError,
    seed,
    services::{
        account_service, category_service, customer_service, order_service, product_service,
        review_service,
    },
    state::AppState,
};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Statement};

// End-to-end CRUD flow over the service layer: round trips, uniqueness,
// referential checks, the order/product association, and the cascades.
#[tokio::test]
async fn crud_and_association_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    // Category round trip.
    category_service::create_category(
        &state,
        CreateCategoryRequest {
            name: "food".into(),
        },
    )
    .await?;
    let category = Categories::find()
        .filter(categories::Column::Name.eq("food"))
        .one(&state.orm)
        .await?
        .expect("category row");
    let fetched = category_service::get_category(&state, category.id)
        .await?
        .data
        .unwrap();
    assert_eq!(fetched.name, "food");

    // Duplicate category name, case-insensitive and trimmed.
    let err = category_service::create_category(
        &state,
        CreateCategoryRequest {
            name: "  FOOD ".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unprocessable(_)));

    // Customer round trip.
    customer_service::create_customer(
        &state,
        CreateCustomerRequest {
            name: "Wiktor".into(),
            surname: "Soursoup".into(),
            email: "email1@example.com".into(),
            phone: "505606707".into(),
            address: "ul. Sezamkowa 16".into(),
        },
    )
    .await?;
    let customer = Customers::find()
        .filter(customers::Column::Surname.eq("Soursoup"))
        .one(&state.orm)
        .await?
        .expect("customer row");
    let fetched = customer_service::get_customer(&state, customer.id)
        .await?
        .data
        .unwrap();
    assert_eq!(fetched.email, "email1@example.com");
    assert_eq!(fetched.phone, "505606707");

    // Duplicate surname is rejected regardless of case and padding.
    let err = customer_service::create_customer(
        &state,
        CreateCustomerRequest {
            name: "Other".into(),
            surname: " soursoup ".into(),
            email: "email2@example.com".into(),
            phone: "000".into(),
            address: "elsewhere".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unprocessable(_)));

    // Case folding covers non-ASCII letters too.
    customer_service::create_customer(
        &state,
        CreateCustomerRequest {
            name: "Zofia".into(),
            surname: "Żółć".into(),
            email: "email3@example.com".into(),
            phone: "111".into(),
            address: "somewhere".into(),
        },
    )
    .await?;
    let err = customer_service::create_customer(
        &state,
        CreateCustomerRequest {
            name: "Zenon".into(),
            surname: " żółć ".into(),
            email: "email4@example.com".into(),
            phone: "222".into(),
            address: "elsewhere".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unprocessable(_)));

    // Account referencing a missing customer is rejected.
    let err = account_service::create_account(
        &state,
        CreateAccountRequest {
            login: "ghost".into(),
            password: "secret".into(),
            customer_id: customer.id + 999,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unprocessable(_)));

    // Order referencing a missing customer is rejected.
    let err = order_service::create_order(
        &state,
        CreateOrderRequest {
            order_date: Utc::now(),
            customer_id: customer.id + 999,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Unprocessable(_)));

    // Product round trip.
    product_service::create_product(
        &state,
        CreateProductRequest {
            name: "Spaghetti".into(),
            price: 2.99,
            weight: 0.5,
            description: "Italian pasta".into(),
            qty: 100,
            category_id: category.id,
        },
    )
    .await?;
    let product = Products::find()
        .one(&state.orm)
        .await?
        .expect("product row");
    let fetched = product_service::get_product(&state, product.id)
        .await?
        .data
        .unwrap();
    assert_eq!(fetched.name, "Spaghetti");
    assert_eq!(fetched.price, 2.99);
    assert_eq!(fetched.qty, 100);
    assert_eq!(fetched.category_id, category.id);

    // PUT with a mismatched body id is a bad request and mutates nothing.
    let err = category_service::update_category(
        &state,
        category.id,
        UpdateCategoryRequest {
            id: category.id + 1,
            name: "renamed".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    let unchanged = category_service::get_category(&state, category.id)
        .await?
        .data
        .unwrap();
    assert_eq!(unchanged.name, "food");

    // Order with a real customer, then pin the product on it.
    order_service::create_order(
        &state,
        CreateOrderRequest {
            order_date: Utc::now(),
            customer_id: customer.id,
        },
    )
    .await?;
    let order = Orders::find().one(&state.orm).await?.expect("order row");

    order_service::add_product_to_order(
        &state,
        order.id,
        product.id,
        OrderLineRequest { quantity: 3 },
    )
    .await?;

    // The order's product list carries the line quantity, not the stock qty.
    let lines = order_service::get_order_products(&state, order.id)
        .await?
        .data
        .unwrap();
    assert_eq!(lines.items.len(), 1);
    assert_eq!(lines.items[0].id, product.id);
    assert_eq!(lines.items[0].qty, 3);

    // Changing the line quantity leaves the product's own stock alone.
    order_service::update_order_product_quantity(
        &state,
        order.id,
        product.id,
        OrderLineRequest { quantity: 7 },
    )
    .await?;
    let lines = order_service::get_order_products(&state, order.id)
        .await?
        .data
        .unwrap();
    assert_eq!(lines.items[0].qty, 7);
    let stock = product_service::get_product(&state, product.id)
        .await?
        .data
        .unwrap();
    assert_eq!(stock.qty, 100);

    // A product pinned by an order cannot be deleted.
    let err = product_service::delete_product(&state, product.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(product_service::product_exists(&state, product.id).await?);

    // Removing the line removes only the association.
    order_service::remove_product_from_order(&state, order.id, product.id).await?;
    assert!(product_service::product_exists(&state, product.id).await?);
    let lines = order_service::get_order_products(&state, order.id)
        .await?
        .data
        .unwrap();
    assert!(lines.items.is_empty());

    // Reviews: create one, then delete the author and verify the cascade.
    review_service::create_review(
        &state,
        CreateReviewRequest {
            title: "Great product!".into(),
            content: "Very satisfied.".into(),
            customer_id: customer.id,
            product_id: product.id,
        },
    )
    .await?;
    let review = Reviews::find().one(&state.orm).await?.expect("review row");
    assert_eq!(review.customer_id, customer.id);

    // Order references the customer too; detach it first so only the
    // review cascade is under test.
    order_service::delete_order(&state, order.id).await?;

    customer_service::delete_customer(&state, customer.id).await?;
    assert!(!customer_service::customer_exists(&state, customer.id).await?);
    let reviews_left = Reviews::find().all(&state.orm).await?;
    assert!(reviews_left.is_empty());

    // The product was untouched by the customer cascade.
    assert!(product_service::product_exists(&state, product.id).await?);

    // Now unreferenced, the product can be deleted.
    product_service::delete_product(&state, product.id).await?;
    assert!(!product_service::product_exists(&state, product.id).await?);

    // Seeding is gated on every table being empty: the leftover category
    // is enough to make it a no-op.
    assert!(!seed::seed_if_empty(&state.orm).await?);

    let backend = state.orm.get_database_backend();
    state
        .orm
        .execute(Statement::from_string(
            backend,
            "TRUNCATE TABLE order_products, reviews, orders, accounts, products, categories, customers RESTART IDENTITY CASCADE",
        ))
        .await?;

    assert!(seed::seed_if_empty(&state.orm).await?);
    let seeded_categories = Categories::find().all(&state.orm).await?;
    assert_eq!(seeded_categories.len(), 9);
    let seeded_products = Products::find().all(&state.orm).await?;
    assert_eq!(seeded_products.len(), 21);

    // And a second run against the populated database does nothing.
    assert!(!seed::seed_if_empty(&state.orm).await?);

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_products, reviews, orders, accounts, products, categories, customers RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { orm })
}
