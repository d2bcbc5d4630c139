//! Category records.

use crate::entity::EntityKind;
use crate::error::ValidationError;
use crate::ids::{CategoryId, ProductId};
use crate::schema::EntitySchema;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A grouping of products.
///
/// Membership is kept as separate link records, not on the category
/// itself; the wire-level `products` field is composed at projection time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    pub description: String,
    /// URL handle (unique). Derived from the name when not supplied.
    pub slug: String,
    /// Set once when the record is created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Materialize a validated draft into a stored record. `slug` is the
    /// resolved handle, derivation and uniquification already done.
    pub fn from_draft(id: CategoryId, draft: CategoryDraft, slug: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            slug,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields a patch carries. Link changes are handled by
    /// the store, not here.
    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.slug {
            self.slug = v;
        }
    }
}

/// Inbound fields for creating a [`Category`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    /// Explicit handle; leave `None` to derive one from the name.
    pub slug: Option<String>,
    /// Products to link on creation.
    pub products: Vec<ProductId>,
}

impl CategoryDraft {
    /// Check field constraints that need no store state.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Category);
        let mut errors = ValidationError::new();
        schema.check_str(&mut errors, "name", &self.name);
        schema.check_str(&mut errors, "description", &self.description);
        if let Some(slug) = &self.slug {
            schema.check_str(&mut errors, "slug", slug);
        }
        errors.into_result()
    }
}

/// Partial update for a [`Category`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    /// When present, replaces the whole link set.
    pub products: Option<Vec<ProductId>>,
}

impl CategoryPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Category);
        let mut errors = ValidationError::new();
        if let Some(v) = &self.name {
            schema.check_str(&mut errors, "name", v);
        }
        if let Some(v) = &self.description {
            schema.check_str(&mut errors, "description", v);
        }
        if let Some(v) = &self.slug {
            schema.check_str(&mut errors, "slug", v);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_requires_name() {
        let draft = CategoryDraft::default();
        assert!(draft.validate().unwrap_err().mentions("name"));

        let named = CategoryDraft {
            name: "Electronics".into(),
            ..CategoryDraft::default()
        };
        assert!(named.validate().is_ok());
    }

    #[test]
    fn test_draft_rejects_long_slug() {
        let draft = CategoryDraft {
            name: "Electronics".into(),
            slug: Some("s".repeat(151)),
            ..CategoryDraft::default()
        };
        assert!(draft.validate().unwrap_err().mentions("slug"));
    }

    #[test]
    fn test_patch_leaves_links_to_the_store() {
        let now = Utc::now();
        let draft = CategoryDraft {
            name: "Electronics".into(),
            products: vec![ProductId::new(10)],
            ..CategoryDraft::default()
        };
        let mut category =
            Category::from_draft(CategoryId::new(1), draft, "electronics".into(), now);

        category.apply(CategoryPatch {
            name: Some("Gadgets".into()),
            products: Some(vec![ProductId::new(11)]),
            ..CategoryPatch::default()
        });
        assert_eq!(category.name, "Gadgets");
        assert_eq!(category.slug, "electronics");
    }
}
