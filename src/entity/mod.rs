pub mod accounts;
pub mod categories;
pub mod customers;
pub mod order_products;
pub mod orders;
pub mod products;
pub mod reviews;

pub use accounts::Entity as Accounts;
pub use categories::Entity as Categories;
pub use customers::Entity as Customers;
pub use order_products::Entity as OrderProducts;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use reviews::Entity as Reviews;
