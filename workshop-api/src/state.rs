use std::sync::Arc;
use workshop_catalog::ProductRepository;

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    /// Stamped on every request span.
    pub app_name: Arc<str>,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductRepository>, app_name: &str) -> Self {
        Self {
            products,
            app_name: Arc::from(app_name),
        }
    }
}
