use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::{
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    dto::reviews::ReviewList,
    entity::{
        order_products::{Column as OrderProductCol, Entity as OrderProducts},
        products::{ActiveModel, Entity as Products, Model as ProductModel},
        reviews::{Column as ReviewCol, Entity as Reviews},
    },
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    services::{category_service, review_service},
    state::AppState,
};

pub async fn product_exists(state: &AppState, id: i32) -> AppResult<bool> {
    let count = Products::find_by_id(id).count(&state.orm).await?;
    Ok(count > 0)
}

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items: Vec<Product> = Products::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::count(items.len() as i64);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(product_from_entity);
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", product, None))
}

/// All reviews written for one product.
pub async fn get_product_reviews(
    state: &AppState,
    product_id: i32,
) -> AppResult<ApiResponse<ReviewList>> {
    if !product_exists(state, product_id).await? {
        return Err(AppError::NotFound);
    }

    let items = Reviews::find()
        .filter(ReviewCol::ProductId.eq(product_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(review_service::review_from_entity)
        .collect::<Vec<_>>();

    let meta = Meta::count(items.len() as i64);
    Ok(ApiResponse::success(
        "Reviews",
        ReviewList { items },
        Some(meta),
    ))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !category_service::category_exists(state, payload.category_id).await? {
        return Err(AppError::Unprocessable(format!(
            "category id:{} not found",
            payload.category_id
        )));
    }

    if name_taken(state, &payload.name).await? {
        return Err(AppError::Unprocessable("product already exists".into()));
    }

    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        price: Set(payload.price),
        weight: Set(payload.weight),
        description: Set(payload.description),
        qty: Set(payload.qty),
        category_id: Set(payload.category_id),
    };
    let product = active.insert(&state.orm).await?;
    tracing::debug!(product_id = product.id, "product created");

    Ok(ApiResponse::success(
        "Successfully created",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: i32,
    payload: UpdateProductRequest,
) -> AppResult<()> {
    if payload.id != id {
        return Err(AppError::BadRequest(
            "Id in URL does not match id in request body".into(),
        ));
    }

    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    if !category_service::category_exists(state, payload.category_id).await? {
        return Err(AppError::Unprocessable(format!(
            "category id:{} not found",
            payload.category_id
        )));
    }

    let mut active: ActiveModel = existing.into();
    active.name = Set(payload.name);
    active.price = Set(payload.price);
    active.weight = Set(payload.weight);
    active.description = Set(payload.description);
    active.qty = Set(payload.qty);
    active.category_id = Set(payload.category_id);
    active.update(&state.orm).await?;

    Ok(())
}

/// A product pinned by any order line cannot be removed.
pub async fn delete_product(state: &AppState, id: i32) -> AppResult<()> {
    if !product_exists(state, id).await? {
        return Err(AppError::NotFound);
    }

    if referenced_by_order(state, id).await? {
        return Err(AppError::BadRequest(
            "Cannot delete product that is a part of order".into(),
        ));
    }

    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

pub async fn referenced_by_order(state: &AppState, product_id: i32) -> AppResult<bool> {
    let count = OrderProducts::find()
        .filter(OrderProductCol::ProductId.eq(product_id))
        .count(&state.orm)
        .await?;
    Ok(count > 0)
}

async fn name_taken(state: &AppState, name: &str) -> AppResult<bool> {
    // Case folding must cover non-ASCII letters, so lowercase both sides.
    let needle = name.trim().to_lowercase();
    let products = Products::find().all(&state.orm).await?;
    Ok(products
        .iter()
        .any(|p| p.name.trim().to_lowercase() == needle))
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        price: model.price,
        weight: model.weight,
        description: model.description,
        qty: model.qty,
        category_id: model.category_id,
    }
}
