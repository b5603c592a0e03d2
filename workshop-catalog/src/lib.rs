pub mod product;
pub mod pricing;

pub use product::{Product, ProductError, ProductId, ProductRepository};
pub use pricing::{calculate_discount, PARITY_DISCOUNT_PERCENT};
