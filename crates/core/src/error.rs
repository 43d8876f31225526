//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Message shown to clients for failures whose cause must not leak.
pub const INTERNAL_ERROR_MESSAGE: &str = "erro interno";

/// Domain-level error.
///
/// Every variant carries the human-readable message that ends up on the wire,
/// whichever protocol façade reported it. `Internal` is the exception: its
/// payload is for logs only and clients see [`INTERNAL_ERROR_MESSAGE`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A referenced product id is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate id on create.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The product was already sold.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Exchange between products that are not mutually exchangeable.
    #[error("incompatible category: {0}")]
    IncompatibleCategory(String),

    /// Unknown RPC object reference or method.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// Malformed arguments or body.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unexpected failure (e.g. storage unavailable).
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn incompatible(msg: impl Into<String>) -> Self {
        Self::IncompatibleCategory(msg.into())
    }

    pub fn method_not_found(msg: impl Into<String>) -> Self {
        Self::MethodNotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "not_found",
            DomainError::Conflict(_) => "conflict",
            DomainError::Unavailable(_) => "unavailable",
            DomainError::IncompatibleCategory(_) => "incompatible_category",
            DomainError::MethodNotFound(_) => "method_not_found",
            DomainError::BadRequest(_) => "bad_request",
            DomainError::Internal(_) => "internal",
        }
    }

    /// The message clients receive.
    pub fn message(&self) -> &str {
        match self {
            DomainError::NotFound(m)
            | DomainError::Conflict(m)
            | DomainError::Unavailable(m)
            | DomainError::IncompatibleCategory(m)
            | DomainError::MethodNotFound(m)
            | DomainError::BadRequest(m) => m,
            DomainError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_the_payload_for_client_errors() {
        let err = DomainError::unavailable("Produto indisponível.");
        assert_eq!(err.message(), "Produto indisponível.");
        assert_eq!(err.kind(), "unavailable");
    }

    #[test]
    fn internal_message_is_opaque() {
        let err = DomainError::internal("catalog lock poisoned");
        assert_eq!(err.message(), INTERNAL_ERROR_MESSAGE);
        assert!(err.to_string().contains("poisoned"));
    }
}
