//! Sample-data population. Runs as an explicit, idempotent startup step:
//! the catalog is only inserted when every table is empty.

use chrono::{Duration, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, PaginatorTrait, Set, TransactionTrait};

use crate::db::OrmConn;
use crate::entity::{
    Accounts, Categories, Customers, OrderProducts, Orders, Products, Reviews, accounts,
    categories, customers, orders, products, reviews,
};

/// Populate the fixed sample catalog if and only if all tables are empty.
/// Returns whether anything was inserted.
pub async fn seed_if_empty(conn: &OrmConn) -> Result<bool, DbErr> {
    if !all_tables_empty(conn).await? {
        tracing::info!("seed skipped, database is not empty");
        return Ok(false);
    }

    let txn = conn.begin().await?;

    let category_names = [
        "pasta", "meat", "spices", "sauce", "cheese", "seafood", "coffee", "snacks", "liquor",
    ];
    let mut category_ids = Vec::with_capacity(category_names.len());
    for name in category_names {
        let category = categories::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        }
        .insert(&txn)
        .await?;
        category_ids.push(category.id);
    }

    let customer_rows = [
        (
            "Wiktor",
            "Soursoup",
            "email1@example.com",
            "505606707",
            "ul. Sezamkowa 16 80-154 Warszawa",
        ),
        (
            "Janusz",
            "Kowalczyk",
            "email2@example.com",
            "789606707",
            "ul. Krokowa 50 80-154 Warszawa",
        ),
    ];
    let mut customer_ids = Vec::with_capacity(customer_rows.len());
    for (name, surname, email, phone, address) in customer_rows {
        let customer = customers::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            surname: Set(surname.to_string()),
            email: Set(email.to_string()),
            phone: Set(phone.to_string()),
            address: Set(address.to_string()),
        }
        .insert(&txn)
        .await?;
        customer_ids.push(customer.id);
    }

    for (login, customer_id) in [("wiktor1", customer_ids[0]), ("janusz2", customer_ids[1])] {
        accounts::ActiveModel {
            id: NotSet,
            login: Set(login.to_string()),
            password: Set(login.to_string()),
            customer_id: Set(customer_id),
        }
        .insert(&txn)
        .await?;
    }

    let product_rows: [(&str, f64, f64, &str, i32, usize); 21] = [
        ("Spaghetti", 2.99, 0.5, "Italian pasta", 100, 0),
        ("Fusilli", 3.49, 0.6, "Spiral pasta", 80, 0),
        ("Penne", 3.29, 0.7, "Tube-shaped pasta", 90, 0),
        ("Beef", 9.99, 1.5, "Fresh meat", 50, 1),
        ("Chicken", 6.99, 1.2, "Skinless chicken breast", 70, 1),
        ("Pork", 8.49, 1.8, "Tenderloin pork", 60, 1),
        ("Salt", 1.49, 0.2, "Sea salt", 200, 2),
        ("Pepper", 2.99, 0.1, "Black pepper", 150, 2),
        ("Cinnamon", 3.99, 0.3, "Ground cinnamon", 120, 2),
        ("Tomato Sauce", 1.99, 0.5, "Italian tomato sauce", 100, 3),
        ("Mozzarella Cheese", 4.49, 0.4, "Fresh mozzarella cheese", 70, 4),
        ("Salmon", 12.99, 0.9, "Fresh salmon fillet", 40, 5),
        ("Espresso", 3.49, 0.4, "Strong Italian coffee", 50, 6),
        ("Cappuccino", 4.99, 0.5, "Italian coffee with milk foam", 40, 6),
        ("Latte", 4.79, 0.6, "Italian coffee with milk", 45, 6),
        ("Potato Chips", 1.99, 0.2, "Crispy potato chips", 150, 7),
        ("Chocolate Bar", 2.49, 0.1, "Milk chocolate bar", 120, 7),
        ("Popcorn", 1.79, 0.3, "Butter-flavored popcorn", 130, 7),
        ("Whiskey", 29.99, 0.7, "Scotch whiskey", 30, 8),
        ("Vodka", 19.99, 0.8, "Russian vodka", 40, 8),
        ("Rum", 24.99, 0.6, "Caribbean rum", 35, 8),
    ];
    let mut product_ids = Vec::with_capacity(product_rows.len());
    for (name, price, weight, description, qty, category_idx) in product_rows {
        let product = products::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            price: Set(price),
            weight: Set(weight),
            description: Set(description.to_string()),
            qty: Set(qty),
            category_id: Set(category_ids[category_idx]),
        }
        .insert(&txn)
        .await?;
        product_ids.push(product.id);
    }

    orders::ActiveModel {
        id: NotSet,
        order_date: Set((Utc::now() - Duration::days(6)).into()),
        customer_id: Set(customer_ids[0]),
    }
    .insert(&txn)
    .await?;

    reviews::ActiveModel {
        id: NotSet,
        title: Set("Great product!".to_string()),
        content: Set("I'm very satisfied with my purchase.".to_string()),
        customer_id: Set(customer_ids[0]),
        product_id: Set(product_ids[0]),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    tracing::info!("seed completed");

    Ok(true)
}

async fn all_tables_empty(conn: &OrmConn) -> Result<bool, DbErr> {
    Ok(Categories::find().count(conn).await? == 0
        && Customers::find().count(conn).await? == 0
        && Accounts::find().count(conn).await? == 0
        && Products::find().count(conn).await? == 0
        && Orders::find().count(conn).await? == 0
        && OrderProducts::find().count(conn).await? == 0
        && Reviews::find().count(conn).await? == 0)
}
