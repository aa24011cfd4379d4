use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::accounts::{AccountList, CreateAccountRequest, UpdateAccountRequest},
    error::AppResult,
    models::Account,
    response::ApiResponse,
    services::account_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route(
            "/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
}

#[utoipa::path(
    get,
    path = "/api/account",
    responses(
        (status = 200, description = "List accounts", body = ApiResponse<AccountList>)
    ),
    tag = "Account"
)]
pub async fn list_accounts(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<AccountList>>> {
    Ok(Json(account_service::list_accounts(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/account/{id}",
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Get account", body = ApiResponse<Account>),
        (status = 404, description = "Account not found"),
    ),
    tag = "Account"
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Account>>> {
    Ok(Json(account_service::get_account(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/account",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created"),
        (status = 422, description = "Duplicate login or missing customer"),
    ),
    tag = "Account"
)]
pub async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(account_service::create_account(&state, payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/account/{id}",
    params(("id" = i32, Path, description = "Account ID")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 204, description = "Account updated"),
        (status = 400, description = "Body id does not match path id"),
        (status = 404, description = "Account not found"),
    ),
    tag = "Account"
)]
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAccountRequest>,
) -> AppResult<StatusCode> {
    account_service::update_account(&state, id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/account/{id}",
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 404, description = "Account not found"),
    ),
    tag = "Account"
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    account_service::delete_account(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
