pub mod accounts;
pub mod categories;
pub mod customers;
pub mod orders;
pub mod products;
pub mod reviews;
