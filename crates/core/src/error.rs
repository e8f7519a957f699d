//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error for composite operations.
///
/// `NotFound` and `InvalidInput` carry the downstream message verbatim so
/// the API layer can surface it unchanged. Everything else a backing call
/// can fail with (5xx, malformed body, connection failure, timeout) is
/// collapsed into `UnexpectedTransport`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A caller-supplied identifier or payload failed a precondition.
    #[error("{0}")]
    InvalidInput(String),

    /// The requested root entity is absent.
    #[error("{0}")]
    NotFound(String),

    /// Any other downstream failure; opaque to callers, logged in full
    /// at the point of mapping.
    #[error("{0}")]
    UnexpectedTransport(String),

    /// A consumed event could not be processed (unknown event type or
    /// malformed body). Fatal to that single event only.
    #[error("{0}")]
    EventProcessing(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::UnexpectedTransport(msg.into())
    }

    pub fn event_processing(msg: impl Into<String>) -> Self {
        Self::EventProcessing(msg.into())
    }
}
