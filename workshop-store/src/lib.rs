pub mod app_config;
pub mod product_repo;

pub use product_repo::{FixedStock, RandomStock, StockSource, StubProductRepository};
