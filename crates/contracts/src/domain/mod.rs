pub mod online_order;
pub mod online_product;
pub mod online_store;
