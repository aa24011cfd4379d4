use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

use crate::{
    dto::reviews::{CreateReviewRequest, ReviewList, UpdateReviewRequest},
    entity::reviews::{ActiveModel, Entity as Reviews, Model as ReviewModel},
    error::{AppError, AppResult},
    models::Review,
    response::{ApiResponse, Meta},
    services::{customer_service, product_service},
    state::AppState,
};

pub async fn review_exists(state: &AppState, id: i32) -> AppResult<bool> {
    let count = Reviews::find_by_id(id).count(&state.orm).await?;
    Ok(count > 0)
}

pub async fn list_reviews(state: &AppState) -> AppResult<ApiResponse<ReviewList>> {
    let items: Vec<Review> = Reviews::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(review_from_entity)
        .collect();

    let meta = Meta::count(items.len() as i64);
    Ok(ApiResponse::success(
        "Reviews",
        ReviewList { items },
        Some(meta),
    ))
}

pub async fn get_review(state: &AppState, id: i32) -> AppResult<ApiResponse<Review>> {
    let review = Reviews::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(review_from_entity);
    let review = match review {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Review", review, None))
}

pub async fn create_review(
    state: &AppState,
    payload: CreateReviewRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !customer_service::customer_exists(state, payload.customer_id).await? {
        return Err(AppError::Unprocessable(format!(
            "customer id:{} not found",
            payload.customer_id
        )));
    }

    if !product_service::product_exists(state, payload.product_id).await? {
        return Err(AppError::Unprocessable(format!(
            "product id:{} not found",
            payload.product_id
        )));
    }

    let active = ActiveModel {
        id: NotSet,
        title: Set(payload.title),
        content: Set(payload.content),
        customer_id: Set(payload.customer_id),
        product_id: Set(payload.product_id),
    };
    let review = active.insert(&state.orm).await?;
    tracing::debug!(review_id = review.id, "review created");

    Ok(ApiResponse::success(
        "Successfully created",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn update_review(
    state: &AppState,
    id: i32,
    payload: UpdateReviewRequest,
) -> AppResult<()> {
    if payload.id != id {
        return Err(AppError::BadRequest(
            "Id in URL does not match id in request body".into(),
        ));
    }

    let existing = Reviews::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    if !customer_service::customer_exists(state, payload.customer_id).await? {
        return Err(AppError::Unprocessable(format!(
            "customer id:{} not found",
            payload.customer_id
        )));
    }

    if !product_service::product_exists(state, payload.product_id).await? {
        return Err(AppError::Unprocessable(format!(
            "product id:{} not found",
            payload.product_id
        )));
    }

    let mut active: ActiveModel = existing.into();
    active.title = Set(payload.title);
    active.content = Set(payload.content);
    active.customer_id = Set(payload.customer_id);
    active.product_id = Set(payload.product_id);
    active.update(&state.orm).await?;

    Ok(())
}

pub async fn delete_review(state: &AppState, id: i32) -> AppResult<()> {
    let result = Reviews::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

pub(crate) fn review_from_entity(model: ReviewModel) -> Review {
    Review {
        id: model.id,
        title: model.title,
        content: model.content,
        customer_id: model.customer_id,
        product_id: model.product_id,
    }
}
