use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::{
    dto::orders::{CreateOrderRequest, OrderLineRequest, OrderList, UpdateOrderRequest},
    dto::products::ProductList,
    entity::{
        order_products::{
            ActiveModel as OrderProductActive, Column as OrderProductCol, Entity as OrderProducts,
        },
        orders::{ActiveModel, Entity as Orders, Model as OrderModel},
        products::{Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult},
    models::{Order, Product},
    response::{ApiResponse, Meta},
    services::{customer_service, product_service},
    state::AppState,
};

pub async fn order_exists(state: &AppState, id: i32) -> AppResult<bool> {
    let count = Orders::find_by_id(id).count(&state.orm).await?;
    Ok(count > 0)
}

pub async fn list_orders(state: &AppState) -> AppResult<ApiResponse<OrderList>> {
    let items: Vec<Order> = Orders::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::count(items.len() as i64);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(meta),
    ))
}

pub async fn get_order(state: &AppState, id: i32) -> AppResult<ApiResponse<Order>> {
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(order_from_entity);
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Order", order, None))
}

/// Products on an order, with each product's `qty` replaced by the
/// quantity pinned on the association row.
pub async fn get_order_products(
    state: &AppState,
    order_id: i32,
) -> AppResult<ApiResponse<ProductList>> {
    if !order_exists(state, order_id).await? {
        return Err(AppError::NotFound);
    }

    let lines = OrderProducts::find()
        .filter(OrderProductCol::OrderId.eq(order_id))
        .all(&state.orm)
        .await?;

    let product_ids: Vec<i32> = lines.iter().map(|line| line.product_id).collect();
    let products = Products::find()
        .filter(ProductCol::Id.is_in(product_ids))
        .all(&state.orm)
        .await?;

    let items: Vec<Product> = lines
        .iter()
        .filter_map(|line| {
            products
                .iter()
                .find(|p| p.id == line.product_id)
                .cloned()
                .map(|p| {
                    let mut product = product_service::product_from_entity(p);
                    product.qty = line.quantity;
                    product
                })
        })
        .collect();

    let meta = Meta::count(items.len() as i64);
    Ok(ApiResponse::success(
        "Order products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !customer_service::customer_exists(state, payload.customer_id).await? {
        return Err(AppError::Unprocessable(format!(
            "customer id:{} not found",
            payload.customer_id
        )));
    }

    let active = ActiveModel {
        id: NotSet,
        order_date: Set(payload.order_date.into()),
        customer_id: Set(payload.customer_id),
    };
    let order = active.insert(&state.orm).await?;
    tracing::debug!(order_id = order.id, "order created");

    Ok(ApiResponse::success(
        "Successfully created",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn update_order(
    state: &AppState,
    id: i32,
    payload: UpdateOrderRequest,
) -> AppResult<()> {
    if payload.id != id {
        return Err(AppError::BadRequest(
            "Id in URL does not match id in request body".into(),
        ));
    }

    let existing = Orders::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    if !customer_service::customer_exists(state, payload.customer_id).await? {
        return Err(AppError::Unprocessable(format!(
            "customer id:{} not found",
            payload.customer_id
        )));
    }

    let mut active: ActiveModel = existing.into();
    active.order_date = Set(payload.order_date.into());
    active.customer_id = Set(payload.customer_id);
    active.update(&state.orm).await?;

    Ok(())
}

/// Removing an order detaches its line items in the same transaction.
pub async fn delete_order(state: &AppState, id: i32) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    let removed_lines = OrderProducts::delete_many()
        .filter(OrderProductCol::OrderId.eq(id))
        .exec(&txn)
        .await?;

    let result = Orders::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    txn.commit().await?;
    tracing::debug!(
        order_id = id,
        lines = removed_lines.rows_affected,
        "order deleted"
    );

    Ok(())
}

/// Pin a product on an order at the given quantity. Both sides must
/// already exist.
pub async fn add_product_to_order(
    state: &AppState,
    order_id: i32,
    product_id: i32,
    payload: OrderLineRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !product_service::product_exists(state, product_id).await? {
        return Err(AppError::Unprocessable(format!(
            "product id:{product_id} not found"
        )));
    }

    if !order_exists(state, order_id).await? {
        return Err(AppError::Unprocessable(format!(
            "order id:{order_id} not found"
        )));
    }

    let line = OrderProductActive {
        order_id: Set(order_id),
        product_id: Set(product_id),
        quantity: Set(payload.quantity),
    };
    line.insert(&state.orm).await?;

    Ok(ApiResponse::success(
        "Successfully created",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Locates the association by (order id, product id) and overwrites the
/// quantity field; the product's own stock quantity is untouched.
pub async fn update_order_product_quantity(
    state: &AppState,
    order_id: i32,
    product_id: i32,
    payload: OrderLineRequest,
) -> AppResult<()> {
    if !order_exists(state, order_id).await? {
        return Err(AppError::NotFound);
    }

    let line = OrderProducts::find_by_id((order_id, product_id))
        .one(&state.orm)
        .await?;
    let line = match line {
        Some(l) => l,
        None => return Err(AppError::NotFound),
    };

    let mut active: OrderProductActive = line.into();
    active.quantity = Set(payload.quantity);
    active.update(&state.orm).await?;

    Ok(())
}

/// Removes only the association row, never the product itself.
pub async fn remove_product_from_order(
    state: &AppState,
    order_id: i32,
    product_id: i32,
) -> AppResult<()> {
    if !order_exists(state, order_id).await? {
        return Err(AppError::NotFound);
    }

    let result = OrderProducts::delete_by_id((order_id, product_id))
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        order_date: model.order_date.with_timezone(&Utc),
        customer_id: model.customer_id,
    }
}
