pub mod account_service;
pub mod category_service;
pub mod customer_service;
pub mod order_service;
pub mod product_service;
pub mod review_service;
