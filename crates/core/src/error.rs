//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a recoverable user-input failure. None of them describe
/// IO or infrastructure problems; there is no IO in the domain layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The item name was empty after trimming.
    #[error("item name cannot be empty")]
    EmptyName,

    /// A record with the same (case-sensitive) name already exists.
    #[error("item '{0}' is already on the list")]
    DuplicateName(String),

    /// Quantity was zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    InvalidQuantity(i64),

    /// No record matched the given identifier.
    #[error("item '{0}' was not found")]
    NotFound(String),

    /// An identifier could not be parsed (e.g. a malformed catalog number).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A counter or total would exceed its numeric range.
    #[error("{0} out of range")]
    Overflow(&'static str),
}

impl DomainError {
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    pub fn not_found(identifier: impl ToString) -> Self {
        Self::NotFound(identifier.to_string())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Stable machine-readable code (used in JSON bodies and logs).
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::EmptyName => "empty_name",
            DomainError::DuplicateName(_) => "duplicate_name",
            DomainError::InvalidQuantity(_) => "invalid_quantity",
            DomainError::NotFound(_) => "not_found",
            DomainError::InvalidId(_) => "invalid_id",
            DomainError::Overflow(_) => "overflow",
        }
    }
}
