use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::orders::{CreateOrderRequest, OrderLineRequest, OrderList, UpdateOrderRequest},
    dto::products::ProductList,
    error::AppResult,
    models::Order,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/{id}/products", get(get_order_products))
        .route("/{id}/product/{product_id}", post(add_product_to_order))
        .route(
            "/{id}/products/{product_id}",
            put(update_order_product).delete(remove_product_from_order),
        )
}

#[utoipa::path(
    get,
    path = "/api/order",
    responses(
        (status = 200, description = "List orders", body = ApiResponse<OrderList>)
    ),
    tag = "Order"
)]
pub async fn list_orders(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    Ok(Json(order_service::list_orders(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/order/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Get order", body = ApiResponse<Order>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Order"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(order_service::get_order(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/api/order/{id}/products",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Products on the order with line quantities", body = ApiResponse<ProductList>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Order"
)]
pub async fn get_order_products(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    Ok(Json(order_service::get_order_products(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/order",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created"),
        (status = 422, description = "Missing customer"),
    ),
    tag = "Order"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(order_service::create_order(&state, payload).await?))
}

#[utoipa::path(
    post,
    path = "/api/order/{id}/product/{product_id}",
    params(
        ("id" = i32, Path, description = "Order ID"),
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    request_body = OrderLineRequest,
    responses(
        (status = 200, description = "Product added to order"),
        (status = 422, description = "Order or product not found"),
    ),
    tag = "Order"
)]
pub async fn add_product_to_order(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(i32, i32)>,
    Json(payload): Json<OrderLineRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(
        order_service::add_product_to_order(&state, id, product_id, payload).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/api/order/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 204, description = "Order updated"),
        (status = 400, description = "Body id does not match path id"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Order"
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<StatusCode> {
    order_service::update_order(&state, id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/order/{id}/products/{product_id}",
    params(
        ("id" = i32, Path, description = "Order ID"),
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    request_body = OrderLineRequest,
    responses(
        (status = 204, description = "Line quantity updated"),
        (status = 404, description = "Order or line not found"),
    ),
    tag = "Order"
)]
pub async fn update_order_product(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(i32, i32)>,
    Json(payload): Json<OrderLineRequest>,
) -> AppResult<StatusCode> {
    order_service::update_order_product_quantity(&state, id, product_id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/order/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order and its lines deleted"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Order"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    order_service::delete_order(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/order/{id}/products/{product_id}",
    params(
        ("id" = i32, Path, description = "Order ID"),
        ("product_id" = i32, Path, description = "Product ID"),
    ),
    responses(
        (status = 204, description = "Product removed from order"),
        (status = 404, description = "Order or line not found"),
    ),
    tag = "Order"
)]
pub async fn remove_product_from_order(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    order_service::remove_product_from_order(&state, id, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
