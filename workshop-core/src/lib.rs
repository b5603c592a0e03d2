pub mod severity;

pub use severity::Severity;

// Re-exported so `emit!` resolves for callers without their own tracing import.
#[doc(hidden)]
pub use tracing;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
