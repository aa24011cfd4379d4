use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Account;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    pub login: String,
    pub password: String,
    pub customer_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    pub id: i32,
    pub login: String,
    pub password: String,
    pub customer_id: i32,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct AccountList {
    #[schema(value_type = Vec<Account>)]
    pub items: Vec<Account>,
}
