use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
    error::AppResult,
    models::Customer,
    response::ApiResponse,
    services::customer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

#[utoipa::path(
    get,
    path = "/api/customer",
    responses(
        (status = 200, description = "List customers", body = ApiResponse<CustomerList>)
    ),
    tag = "Customer"
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CustomerList>>> {
    Ok(Json(customer_service::list_customers(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/customer/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Get customer", body = ApiResponse<Customer>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customer"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    Ok(Json(customer_service::get_customer(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/customer",
    request_body = CreateCustomerRequest,
    responses(
        (status = 200, description = "Customer created"),
        (status = 422, description = "Duplicate surname"),
    ),
    tag = "Customer"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(customer_service::create_customer(&state, payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/customer/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 204, description = "Customer updated"),
        (status = 400, description = "Body id does not match path id"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customer"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> AppResult<StatusCode> {
    customer_service::update_customer(&state, id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/customer/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 204, description = "Customer and authored reviews deleted"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customer"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    customer_service::delete_customer(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
