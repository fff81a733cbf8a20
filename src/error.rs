//! Error types for ledger mutation and filtering.

use thiserror::Error;

/// Errors raised by the ledger model and the filtering engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A mutation was attempted on a read-only (filtered) entity
    #[error("unsupported operation: cannot {operation} on read-only {entity}")]
    UnsupportedOperation {
        entity: &'static str,
        operation: &'static str,
    },

    /// The source ledger or the build order broke an internal invariant
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("invalid filter configuration: {0}")]
    InvalidConfiguration(String),
}

impl LedgerError {
    pub(crate) fn unsupported(entity: &'static str, operation: &'static str) -> Self {
        Self::UnsupportedOperation { entity, operation }
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;
