use axum::extract::{Query, State};
use tracing::{debug, info, trace, Span};
use workshop_catalog::ProductId;

use crate::error::AppError;
use crate::state::AppState;

pub const PRODUCT_ID_PARAM: &str = "product_id";

/// ANY /?product_id=<int>
///
/// Looks the product up, applies the parity discount and renders the record
/// as plain text.
pub async fn get_product(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<String, AppError> {
    trace!(params = params.len(), "Product request received");

    let product_id = parse_product_id(params)?;
    Span::current().record("ctx_id", product_id);

    debug!(product_id, "Fetching product");
    let mut product = state
        .products
        .get_product(product_id)
        .await
        .map_err(|source| AppError::ProductLookup { id: product_id, source })?;

    product.apply_discount();
    if product.has_discount() {
        info!(product_id, stock = product.stock, "User gets {} discount", product.discount);
    }

    Ok(product.to_string())
}

/// First `product_id` value wins when the parameter is repeated.
pub fn parse_product_id(params: Vec<(String, String)>) -> Result<ProductId, AppError> {
    let raw = params
        .into_iter()
        .find(|(key, _)| key == PRODUCT_ID_PARAM)
        .map(|(_, value)| value)
        .ok_or(AppError::MissingProductId)?;

    raw.parse::<ProductId>()
        .map_err(|_| AppError::MalformedProductId(raw.clone()))
}
