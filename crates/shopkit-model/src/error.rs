//! Validation errors tagged by field.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Key under which record-level problems are reported when no single
/// field is to blame.
pub const NON_FIELD: &str = "non_field_errors";

/// A single complaint about one field of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the offending field, or [`NON_FIELD`].
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A rejected payload, carrying every field problem found in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("validation failed: {}", format_fields(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// An empty collector. Not an error yet; see [`into_result`](Self::into_result).
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// A one-field error.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// A record-level error under [`NON_FIELD`].
    pub fn non_field(message: impl Into<String>) -> Self {
        Self::single(NON_FIELD, message)
    }

    /// Record a problem with one field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Fold another collector's problems into this one.
    pub fn merge(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok(())` when nothing was collected, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Whether any complaint targets `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl Default for ValidationError {
    fn default() -> Self {
        Self::new()
    }
}

fn format_fields(errors: &[FieldError]) -> String {
    let mut out = String::new();
    for (i, err) in errors.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        out.push_str(&err.to_string());
    }
    out
}
