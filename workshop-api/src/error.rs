use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use workshop_catalog::{ProductError, ProductId};
use workshop_core::{emit, Severity};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no product id supplied")]
    MissingProductId,
    #[error("failed to parse product id {0:?}")]
    MalformedProductId(String),
    #[error("failed to get product with id {id}: {source}")]
    ProductLookup {
        id: ProductId,
        source: ProductError,
    },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingProductId | AppError::MalformedProductId(_) => StatusCode::BAD_REQUEST,
            AppError::ProductLookup { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Caller mistakes are warnings; a failed lookup is an error.
    pub fn severity(&self) -> Severity {
        match self {
            AppError::MissingProductId | AppError::MalformedProductId(_) => Severity::Warn,
            AppError::ProductLookup { .. } => Severity::Error,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        emit!(self.severity(), status = status.as_u16(), "{}", self);

        (status, self.to_string()).into_response()
    }
}
