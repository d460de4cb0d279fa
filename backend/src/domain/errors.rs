//! Domain error taxonomy.
//!
//! Storage failures are deliberately absent: persistence problems are
//! retried or logged by the item service and never surface to the user, so
//! only user-actionable failures live here. Partial imports are reported
//! through [`shared::ImportResult::dropped`], not as an error.

use thiserror::Error;

/// User-facing domain failures.
///
/// Every variant maps to a locale-table key via [`DomainError::message_key`];
/// the UI layer resolves the key against the active language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A required field is missing or empty.
    #[error("please fill all required fields")]
    Validation,

    /// An amount entry did not parse as the required positive integers.
    #[error("invalid amount")]
    InvalidAmount,

    /// A decrease would take the quantity below zero.
    #[error("insufficient items to take: {available} on hand, {requested} requested")]
    InsufficientStock { available: i64, requested: i64 },

    /// No item with the given id exists in the collection.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// An import payload was not a recognized shape (envelope or bare array).
    #[error("unrecognized import format")]
    Format,

    /// An import payload contained no acceptable records.
    #[error("no valid items found")]
    NoValidItems,

    /// Export was requested while the collection is empty.
    #[error("no data to export")]
    NothingToExport,
}

impl DomainError {
    /// Stable key into the UI locale tables for this failure.
    pub fn message_key(&self) -> &'static str {
        match self {
            DomainError::Validation => "validation",
            DomainError::InvalidAmount => "invalidAmount",
            DomainError::InsufficientStock { .. } => "insufficientItems",
            DomainError::ItemNotFound(_) => "itemNotFound",
            DomainError::Format => "invalidFormat",
            DomainError::NoValidItems => "noValidItems",
            DomainError::NothingToExport => "nothingToExport",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_keys_are_stable() {
        assert_eq!(DomainError::Validation.message_key(), "validation");
        assert_eq!(
            DomainError::InsufficientStock {
                available: 10,
                requested: 15
            }
            .message_key(),
            "insufficientItems"
        );
        assert_eq!(DomainError::Format.message_key(), "invalidFormat");
    }
}
