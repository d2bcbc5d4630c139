//! Wire-layer error type.

use shopkit_model::ValidationError;
use shopkit_store::StoreError;
use thiserror::Error;

/// Errors surfaced to an external caller.
///
/// Store-side validation failures are flattened into [`Validation`] so the
/// caller sees one shape whether a payload was rejected before or at the
/// point of persistence.
///
/// [`Validation`]: TransferError::Validation
#[derive(Debug, Error)]
pub enum TransferError {
    /// The payload failed one or more field constraints.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A missing record or a uniqueness conflict from the store.
    #[error(transparent)]
    Store(StoreError),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(String),

    /// A collection path naming no entity.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),
}

impl TransferError {
    /// Whether this addresses something that does not exist, a record or
    /// a whole collection.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransferError::Store(e) if e.is_not_found())
            || matches!(self, TransferError::UnknownCollection(_))
    }

    /// Whether this is a payload or constraint rejection.
    pub fn is_validation(&self) -> bool {
        matches!(self, TransferError::Validation(_))
    }

    /// Whether this is a uniqueness conflict introduced by an update.
    pub fn is_conflict(&self) -> bool {
        matches!(self, TransferError::Store(e) if e.is_conflict())
    }
}

impl From<StoreError> for TransferError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(v) => TransferError::Validation(v),
            other => TransferError::Store(other),
        }
    }
}

impl From<serde_json::Error> for TransferError {
    fn from(e: serde_json::Error) -> Self {
        TransferError::Json(e.to_string())
    }
}
