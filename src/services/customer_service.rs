use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::{
    dto::customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
    entity::{
        customers::{ActiveModel, Entity as Customers, Model as CustomerModel},
        reviews::{Column as ReviewCol, Entity as Reviews},
    },
    error::{AppError, AppResult},
    models::Customer,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn customer_exists(state: &AppState, id: i32) -> AppResult<bool> {
    let count = Customers::find_by_id(id).count(&state.orm).await?;
    Ok(count > 0)
}

pub async fn list_customers(state: &AppState) -> AppResult<ApiResponse<CustomerList>> {
    let items: Vec<Customer> = Customers::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(customer_from_entity)
        .collect();

    let meta = Meta::count(items.len() as i64);
    Ok(ApiResponse::success(
        "Customers",
        CustomerList { items },
        Some(meta),
    ))
}

pub async fn get_customer(state: &AppState, id: i32) -> AppResult<ApiResponse<Customer>> {
    let customer = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(customer_from_entity);
    let customer = match customer {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Customer", customer, None))
}

pub async fn create_customer(
    state: &AppState,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if surname_taken(state, &payload.surname).await? {
        return Err(AppError::Unprocessable("Customer already exists".into()));
    }

    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        surname: Set(payload.surname),
        email: Set(payload.email),
        phone: Set(payload.phone),
        address: Set(payload.address),
    };
    let customer = active.insert(&state.orm).await?;
    tracing::debug!(customer_id = customer.id, "customer created");

    Ok(ApiResponse::success(
        "Successfully created",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn update_customer(
    state: &AppState,
    id: i32,
    payload: UpdateCustomerRequest,
) -> AppResult<()> {
    if payload.id != id {
        return Err(AppError::BadRequest(
            "Id in URL does not match id in request body".into(),
        ));
    }

    let existing = Customers::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(payload.name);
    active.surname = Set(payload.surname);
    active.email = Set(payload.email);
    active.phone = Set(payload.phone);
    active.address = Set(payload.address);
    active.update(&state.orm).await?;

    Ok(())
}

/// Removing a customer also removes every review they authored; both
/// deletes run in one transaction so a failure leaves nothing half-done.
pub async fn delete_customer(state: &AppState, id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    let removed_reviews = Reviews::delete_many()
        .filter(ReviewCol::CustomerId.eq(id))
        .exec(&txn)
        .await?;

    let result = Customers::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    txn.commit().await?;
    tracing::debug!(
        customer_id = id,
        reviews = removed_reviews.rows_affected,
        "customer deleted"
    );

    Ok(())
}

async fn surname_taken(state: &AppState, surname: &str) -> AppResult<bool> {
    // Case folding must cover non-ASCII letters, so lowercase both sides.
    let needle = surname.trim().to_lowercase();
    let customers = Customers::find().all(&state.orm).await?;
    Ok(customers
        .iter()
        .any(|c| c.surname.trim().to_lowercase() == needle))
}

fn customer_from_entity(model: CustomerModel) -> Customer {
    Customer {
        id: model.id,
        name: model.name,
        surname: model.surname,
        email: model.email,
        phone: model.phone,
        address: model.address,
    }
}
