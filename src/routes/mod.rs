use axum::Router;

use crate::state::AppState;

pub mod account;
pub mod category;
pub mod customer;
pub mod doc;
pub mod health;
pub mod order;
pub mod product;
pub mod review;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/account", account::router())
        .nest("/category", category::router())
        .nest("/customer", customer::router())
        .nest("/order", order::router())
        .nest("/product", product::router())
        .nest("/review", review::router())
}
