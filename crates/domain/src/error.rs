use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("query id must not be empty")]
    EmptyQueryId,
    #[error("query id {0:?} must not contain path separators or parent references")]
    UnsafeQueryId(String),
    #[error("encoded image payload is empty")]
    EmptyPayload,
    #[error("thumbnail bounds must be positive, got {width}x{height}")]
    ZeroBounds { width: u32, height: u32 },
}
