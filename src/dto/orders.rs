use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Order;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub order_date: DateTime<Utc>,
    pub customer_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub id: i32,
    pub order_date: DateTime<Utc>,
    pub customer_id: i32,
}

/// Body for adding a product to an order or changing a line's quantity;
/// both sides of the association come from the path.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    pub quantity: i32,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}
