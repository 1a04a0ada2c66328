pub mod order_status;
pub mod product_status;

pub use order_status::OrderStatus;
pub use product_status::ProductStatus;
