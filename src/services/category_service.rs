use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

use crate::{
    dto::categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
    entity::categories::{ActiveModel, Entity as Categories, Model as CategoryModel},
    error::{AppError, AppResult},
    models::Category,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn category_exists(state: &AppState, id: i32) -> AppResult<bool> {
    let count = Categories::find_by_id(id).count(&state.orm).await?;
    Ok(count > 0)
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items: Vec<Category> = Categories::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();

    let meta = Meta::count(items.len() as i64);
    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(meta),
    ))
}

pub async fn get_category(state: &AppState, id: i32) -> AppResult<ApiResponse<Category>> {
    let category = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(category_from_entity);
    let category = match category {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Category", category, None))
}

pub async fn create_category(
    state: &AppState,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if name_taken(state, &payload.name).await? {
        return Err(AppError::Unprocessable("category already exists".into()));
    }

    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
    };
    let category = active.insert(&state.orm).await?;
    tracing::debug!(category_id = category.id, "category created");

    Ok(ApiResponse::success(
        "Successfully created",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    id: i32,
    payload: UpdateCategoryRequest,
) -> AppResult<()> {
    if payload.id != id {
        return Err(AppError::BadRequest(
            "Id in URL does not match id in request body".into(),
        ));
    }

    let existing = Categories::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.into();
    active.name = Set(payload.name);
    active.update(&state.orm).await?;

    Ok(())
}

pub async fn delete_category(state: &AppState, id: i32) -> AppResult<()> {
    let result = Categories::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Uniqueness is case-insensitive and whitespace-trimmed, checked with a
/// linear scan over the table like every other unique key in this API.
async fn name_taken(state: &AppState, name: &str) -> AppResult<bool> {
    // Case folding must cover non-ASCII letters, so lowercase both sides.
    let needle = name.trim().to_lowercase();
    let categories = Categories::find().all(&state.orm).await?;
    Ok(categories
        .iter()
        .any(|c| c.name.trim().to_lowercase() == needle))
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        name: model.name,
    }
}
