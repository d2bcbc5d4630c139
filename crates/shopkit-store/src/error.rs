//! Store error types.

use shopkit_model::{EntityKind, ValidationError};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when using the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A payload failed field validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The addressed record does not exist.
    #[error("{kind} not found: {key}")]
    NotFound { kind: EntityKind, key: String },

    /// An update would break a uniqueness guarantee.
    #[error("{kind}.{field} conflict: \"{value}\" is already in use")]
    Conflict {
        kind: EntityKind,
        field: &'static str,
        value: String,
    },
}

impl StoreError {
    /// The addressed id or slug did not resolve.
    pub fn not_found(kind: EntityKind, key: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// An update collided with an existing unique value.
    pub fn conflict(kind: EntityKind, field: &'static str, value: impl Into<String>) -> Self {
        Self::Conflict {
            kind,
            field,
            value: value.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        let missing = StoreError::not_found(EntityKind::Product, 42);
        assert_eq!(missing.to_string(), "product not found: 42");
        assert!(missing.is_not_found());

        let taken = StoreError::conflict(EntityKind::Category, "slug", "electronics");
        assert_eq!(
            taken.to_string(),
            "category.slug conflict: \"electronics\" is already in use"
        );
        assert!(taken.is_conflict());
    }

    #[test]
    fn test_validation_passes_through() {
        let err: StoreError = ValidationError::single("title", "may not be blank").into();
        assert_eq!(err.to_string(), "validation failed: title: may not be blank");
    }
}
