use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        accounts::AccountList, categories::CategoryList, customers::CustomerList,
        orders::OrderList, products::ProductList, reviews::ReviewList,
    },
    error::ErrorData,
    models::{Account, Category, Customer, Order, Product, Review},
    response::{ApiResponse, Meta},
    routes::{account, category, customer, health, order, product, review},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        account::list_accounts,
        account::get_account,
        account::create_account,
        account::update_account,
        account::delete_account,
        category::list_categories,
        category::get_category,
        category::create_category,
        category::update_category,
        category::delete_category,
        customer::list_customers,
        customer::get_customer,
        customer::create_customer,
        customer::update_customer,
        customer::delete_customer,
        order::list_orders,
        order::get_order,
        order::get_order_products,
        order::create_order,
        order::add_product_to_order,
        order::update_order,
        order::update_order_product,
        order::delete_order,
        order::remove_product_from_order,
        product::list_products,
        product::get_product,
        product::get_product_reviews,
        product::create_product,
        product::update_product,
        product::delete_product,
        review::list_reviews,
        review::get_review,
        review::create_review,
        review::update_review,
        review::delete_review,
    ),
    components(
        schemas(
            Account,
            Category,
            Customer,
            Order,
            Product,
            Review,
            AccountList,
            CategoryList,
            CustomerList,
            OrderList,
            ProductList,
            ReviewList,
            ErrorData,
            Meta,
            ApiResponse<Account>,
            ApiResponse<Category>,
            ApiResponse<Customer>,
            ApiResponse<Order>,
            ApiResponse<Product>,
            ApiResponse<Review>,
            ApiResponse<AccountList>,
            ApiResponse<CategoryList>,
            ApiResponse<CustomerList>,
            ApiResponse<OrderList>,
            ApiResponse<ProductList>,
            ApiResponse<ReviewList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Account", description = "Account endpoints"),
        (name = "Category", description = "Category endpoints"),
        (name = "Customer", description = "Customer endpoints"),
        (name = "Order", description = "Order endpoints"),
        (name = "Product", description = "Product endpoints"),
        (name = "Review", description = "Review endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
