//! Customer ratings on products.

use crate::entity::EntityKind;
use crate::error::ValidationError;
use crate::ids::{ProductId, RatingId, UserId};
use crate::schema::EntitySchema;
use serde::{Deserialize, Serialize};

/// One customer's rating of one product.
///
/// A user may rate the same product more than once; the aggregate on the
/// product is maintained elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    /// Unique rating identifier.
    pub id: RatingId,
    /// Rated product.
    pub product: ProductId,
    /// Rating author.
    pub user: UserId,
    /// Score value.
    pub rating: i64,
    /// Optional review text.
    pub comment: String,
}

impl Rating {
    /// Materialize a validated draft into a stored record.
    pub fn from_draft(id: RatingId, draft: RatingDraft) -> Self {
        Self {
            id,
            product: draft.product,
            user: draft.user,
            rating: draft.rating,
            comment: draft.comment,
        }
    }

    /// Overwrite the fields a patch carries.
    pub fn apply(&mut self, patch: RatingPatch) {
        if let Some(v) = patch.product {
            self.product = v;
        }
        if let Some(v) = patch.user {
            self.user = v;
        }
        if let Some(v) = patch.rating {
            self.rating = v;
        }
        if let Some(v) = patch.comment {
            self.comment = v;
        }
    }
}

/// Inbound fields for creating a [`Rating`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RatingDraft {
    pub product: ProductId,
    pub user: UserId,
    pub rating: i64,
    pub comment: String,
}

impl Default for RatingDraft {
    fn default() -> Self {
        Self {
            product: ProductId::new(0),
            user: UserId::new(0),
            rating: 0,
            comment: String::new(),
        }
    }
}

impl RatingDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Rating);
        let mut errors = ValidationError::new();
        schema.check_str(&mut errors, "comment", &self.comment);
        errors.into_result()
    }
}

/// Partial update for a [`Rating`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RatingPatch {
    pub product: Option<ProductId>,
    pub user: Option<UserId>,
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

impl RatingPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Rating);
        let mut errors = ValidationError::new();
        if let Some(v) = &self.comment {
            schema.check_str(&mut errors, "comment", v);
        }
        errors.into_result()
    }
}
