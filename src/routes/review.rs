use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::reviews::{CreateReviewRequest, ReviewList, UpdateReviewRequest},
    error::AppResult,
    models::Review,
    response::ApiResponse,
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
}

#[utoipa::path(
    get,
    path = "/api/review",
    responses(
        (status = 200, description = "List reviews", body = ApiResponse<ReviewList>)
    ),
    tag = "Review"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    Ok(Json(review_service::list_reviews(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/review/{id}",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Get review", body = ApiResponse<Review>),
        (status = 404, description = "Review not found"),
    ),
    tag = "Review"
)]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Review>>> {
    Ok(Json(review_service::get_review(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/review",
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review created"),
        (status = 422, description = "Missing customer or product"),
    ),
    tag = "Review"
)]
pub async fn create_review(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    Ok(Json(review_service::create_review(&state, payload).await?))
}

#[utoipa::path(
    put,
    path = "/api/review/{id}",
    params(("id" = i32, Path, description = "Review ID")),
    request_body = UpdateReviewRequest,
    responses(
        (status = 204, description = "Review updated"),
        (status = 400, description = "Body id does not match path id"),
        (status = 404, description = "Review not found"),
    ),
    tag = "Review"
)]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateReviewRequest>,
) -> AppResult<StatusCode> {
    review_service::update_review(&state, id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/review/{id}",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Review not found"),
    ),
    tag = "Review"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    review_service::delete_review(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
