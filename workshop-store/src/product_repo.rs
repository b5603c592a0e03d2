use async_trait::async_trait;
use rand::Rng;
use workshop_catalog::{Product, ProductError, ProductId, ProductRepository};

pub const DEFAULT_PRODUCT_NAME: &str = "product testing";

/// Supplies the stock count for each stubbed lookup.
pub trait StockSource: Send + Sync {
    fn next_stock(&self) -> u64;
}

/// Uniformly random stock in `0..=i64::MAX`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStock;

impl StockSource for RandomStock {
    fn next_stock(&self) -> u64 {
        rand::thread_rng().gen_range(0..=i64::MAX as u64)
    }
}

/// Always reports the same stock count.
#[derive(Debug, Clone, Copy)]
pub struct FixedStock(pub u64);

impl StockSource for FixedStock {
    fn next_stock(&self) -> u64 {
        self.0
    }
}

/// Stand-in for a product database: every valid id resolves to the same
/// placeholder product with a fresh stock count.
pub struct StubProductRepository {
    product_name: String,
    stock: Box<dyn StockSource>,
}

impl StubProductRepository {
    pub fn new(product_name: impl Into<String>, stock: impl StockSource + 'static) -> Self {
        Self {
            product_name: product_name.into(),
            stock: Box::new(stock),
        }
    }

    /// Build from the `[catalog]` config section; `fixed_stock` pins the stock count.
    pub fn from_config(config: &crate::app_config::CatalogConfig) -> Self {
        match config.fixed_stock {
            Some(stock) => Self::new(config.product_name.clone(), FixedStock(stock)),
            None => Self::new(config.product_name.clone(), RandomStock),
        }
    }
}

impl Default for StubProductRepository {
    fn default() -> Self {
        Self::new(DEFAULT_PRODUCT_NAME, RandomStock)
    }
}

#[async_trait]
impl ProductRepository for StubProductRepository {
    async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        if id < 1 {
            return Err(ProductError::InvalidId(id));
        }

        let product = Product::new(self.product_name.clone(), self.stock.next_stock());
        tracing::trace!(product_id = id, stock = product.stock, "Stub product generated");
        Ok(product)
    }
}
