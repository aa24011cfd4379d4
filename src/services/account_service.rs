use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

use crate::{
    dto::accounts::{AccountList, CreateAccountRequest, UpdateAccountRequest},
    entity::accounts::{ActiveModel, Entity as Accounts, Model as AccountModel},
    error::{AppError, AppResult},
    models::Account,
    response::{ApiResponse, Meta},
    services::customer_service,
    state::AppState,
};

pub async fn account_exists(state: &AppState, id: i32) -> AppResult<bool> {
    let count = Accounts::find_by_id(id).count(&state.orm).await?;
    Ok(count > 0)
}

pub async fn list_accounts(state: &AppState) -> AppResult<ApiResponse<AccountList>> {
    let items: Vec<Account> = Accounts::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(account_from_entity)
        .collect();

    let meta = Meta::count(items.len() as i64);
    Ok(ApiResponse::success(
        "Accounts",
        AccountList { items },
        Some(meta),
    ))
}

pub async fn get_account(state: &AppState, id: i32) -> AppResult<ApiResponse<Account>> {
    let account = Accounts::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(account_from_entity);
    let account = match account {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Account", account, None))
}

pub async fn create_account(
    state: &AppState,
    payload: CreateAccountRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !customer_service::customer_exists(state, payload.customer_id).await? {
        return Err(AppError::Unprocessable(format!(
            "customer id:{} not found",
            payload.customer_id
        )));
    }

    if login_taken(state, &payload.login).await? {
        return Err(AppError::Unprocessable("account already exists".into()));
    }

    let active = ActiveModel {
        id: NotSet,
        login: Set(payload.login),
        password: Set(payload.password),
        customer_id: Set(payload.customer_id),
    };
    let account = active.insert(&state.orm).await?;
    tracing::debug!(account_id = account.id, "account created");

    Ok(ApiResponse::success(
        "Successfully created",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn update_account(
    state: &AppState,
    id: i32,
    payload: UpdateAccountRequest,
) -> AppResult<()> {
    if payload.id != id {
        return Err(AppError::BadRequest(
            "Id in URL does not match id in request body".into(),
        ));
    }

    let existing = Accounts::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };

    if !customer_service::customer_exists(state, payload.customer_id).await? {
        return Err(AppError::Unprocessable(format!(
            "customer id:{} not found",
            payload.customer_id
        )));
    }

    let mut active: ActiveModel = existing.into();
    active.login = Set(payload.login);
    active.password = Set(payload.password);
    active.customer_id = Set(payload.customer_id);
    active.update(&state.orm).await?;

    Ok(())
}

pub async fn delete_account(state: &AppState, id: i32) -> AppResult<()> {
    let result = Accounts::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

async fn login_taken(state: &AppState, login: &str) -> AppResult<bool> {
    // Case folding must cover non-ASCII letters, so lowercase both sides.
    let needle = login.trim().to_lowercase();
    let accounts = Accounts::find().all(&state.orm).await?;
    Ok(accounts
        .iter()
        .any(|a| a.login.trim().to_lowercase() == needle))
}

fn account_from_entity(model: AccountModel) -> Account {
    Account {
        id: model.id,
        login: model.login,
        password: model.password,
        customer_id: model.customer_id,
    }
}
