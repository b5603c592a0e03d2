use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::pricing::calculate_discount;

/// Identifier accepted by product lookups. Only values `>= 1` name a product.
pub type ProductId = i64;

/// Core product record, created fresh for every lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub stock: u64,
    /// Discount percentage, always 0 or 20.
    pub discount: u32,
}

impl Product {
    /// A product with no discount applied yet.
    pub fn new(name: impl Into<String>, stock: u64) -> Self {
        Self {
            name: name.into(),
            stock,
            discount: 0,
        }
    }

    /// Set `discount` from the parity of `stock` and return it.
    pub fn apply_discount(&mut self) -> u32 {
        self.discount = calculate_discount(self.stock);
        self.discount
    }

    pub fn has_discount(&self) -> bool {
        self.discount > 0
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{name:{} stock:{} discount:{}}}",
            self.name, self.stock, self.discount
        )
    }
}

/// Product lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    #[error("invalid product id {0}")]
    InvalidId(ProductId),
}

/// Read access to products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch the product for `id`. Fails with [`ProductError::InvalidId`] when `id < 1`.
    async fn get_product(&self, id: ProductId) -> Result<Product, ProductError>;
}
