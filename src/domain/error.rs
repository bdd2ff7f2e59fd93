//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::money::Money;

/// Rejected input values, raised before any node is created.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("negative price for '{name}': {price}")]
    NegativePrice { name: String, price: Money },

    #[error("invalid amount: '{0}'")]
    InvalidAmount(String),
}

/// Domain errors represent violations of the hierarchy's invariants.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("cycle detected: '{parent}' cannot contain '{child}'")]
    Cycle { parent: String, child: String },

    #[error("price overflow while summing: {bundle}")]
    Overflow { bundle: String },

    #[error("duplicate item name: {0}")]
    DuplicateName(String),

    #[error("bundle '{bundle}' references unknown item: {item}")]
    UnknownItem { bundle: String, item: String },

    #[error("item not found: {0}")]
    NotFound(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
