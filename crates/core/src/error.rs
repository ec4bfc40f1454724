//! Domain error model.

use serde_json::{Value, json};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Discriminant identifying which category of failure occurred.
///
/// Error handlers are registered against a kind rather than against a concrete
/// error type, so lookups never depend on runtime type identity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Client input was malformed.
    Validation,
    /// A referenced resource does not exist.
    NotFound,
    /// The persistence collaborator failed.
    Store,
}

impl ErrorKind {
    /// Stable name reported to clients in fallback error bodies.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Store => "StoreError",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, client-caused failures. Infrastructure
/// failures are modelled by the store layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more fields failed validation, in the order they were checked.
    #[error("Validation Error")]
    Validation { violations: Vec<String> },

    /// A requested resource was not found.
    #[error("Not found error")]
    NotFound { detail: String },
}

impl DomainError {
    pub fn validation(violations: Vec<String>) -> Self {
        Self::Validation { violations }
    }

    /// Validation failure carrying a single violation.
    pub fn violation(msg: impl Into<String>) -> Self {
        Self::Validation {
            violations: vec![msg.into()],
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. } => ErrorKind::Validation,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Client-visible context attached to the error.
    pub fn context(&self) -> Value {
        match self {
            DomainError::Validation { violations } => json!({ "violations": violations }),
            DomainError::NotFound { detail } => json!({ "detail": detail }),
        }
    }
}
