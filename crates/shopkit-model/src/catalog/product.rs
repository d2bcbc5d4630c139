//! Product records.

use crate::entity::EntityKind;
use crate::error::ValidationError;
use crate::ids::ProductId;
use crate::patch::double_option;
use crate::schema::EntitySchema;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Products carry no timestamps; history lives on the records that
/// reference them (specials, transactions).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Primary image location.
    pub image: String,
    /// Display title; listings tolerate an empty one.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Aggregate rating, maintained by the surrounding application.
    pub rating: i64,
    pub manufacturer: String,
    /// Price in whole currency units.
    pub price: i64,
    /// Units on hand.
    pub quantity: i64,
    /// URL handle, unique among products that have one. Derived from the
    /// title when not supplied explicitly.
    pub slug: Option<String>,
}

impl Product {
    /// Materialize a validated draft into a stored record. `slug` is the
    /// resolved handle, derivation and uniquification already done.
    pub fn from_draft(id: ProductId, draft: ProductDraft, slug: Option<String>) -> Self {
        Self {
            id,
            image: draft.image,
            title: draft.title,
            description: draft.description,
            rating: draft.rating,
            manufacturer: draft.manufacturer,
            price: draft.price,
            quantity: draft.quantity,
            slug,
        }
    }

    /// Overwrite the fields a patch carries.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(v) = patch.image {
            self.image = v;
        }
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.rating {
            self.rating = v;
        }
        if let Some(v) = patch.manufacturer {
            self.manufacturer = v;
        }
        if let Some(v) = patch.price {
            self.price = v;
        }
        if let Some(v) = patch.quantity {
            self.quantity = v;
        }
        if let Some(v) = patch.slug {
            self.slug = v;
        }
    }

    /// Whether any units are on hand.
    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// Inbound fields for creating a [`Product`]. Every field has a usable
/// default; a bare `{}` payload creates an empty product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub image: String,
    pub title: String,
    pub description: String,
    pub rating: i64,
    pub manufacturer: String,
    pub price: i64,
    pub quantity: i64,
    /// Explicit handle; leave `None` to derive one from the title.
    pub slug: Option<String>,
}

impl ProductDraft {
    /// Check field constraints that need no store state.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Product);
        let mut errors = ValidationError::new();
        schema.check_str(&mut errors, "image", &self.image);
        schema.check_str(&mut errors, "title", &self.title);
        schema.check_str(&mut errors, "description", &self.description);
        schema.check_str(&mut errors, "manufacturer", &self.manufacturer);
        if let Some(slug) = &self.slug {
            schema.check_str(&mut errors, "slug", slug);
        }
        errors.into_result()
    }
}

/// Partial update for a [`Product`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    pub image: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i64>,
    pub manufacturer: Option<String>,
    pub price: Option<i64>,
    pub quantity: Option<i64>,
    /// `Some(None)` clears the handle; retitling alone never touches it.
    #[serde(deserialize_with = "double_option")]
    pub slug: Option<Option<String>>,
}

impl ProductPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Product);
        let mut errors = ValidationError::new();
        if let Some(v) = &self.image {
            schema.check_str(&mut errors, "image", v);
        }
        if let Some(v) = &self.title {
            schema.check_str(&mut errors, "title", v);
        }
        if let Some(v) = &self.description {
            schema.check_str(&mut errors, "description", v);
        }
        if let Some(v) = &self.manufacturer {
            schema.check_str(&mut errors, "manufacturer", v);
        }
        if let Some(Some(slug)) = &self.slug {
            schema.check_str(&mut errors, "slug", slug);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_draft_is_valid() {
        let draft = ProductDraft::default();
        assert!(draft.validate().is_ok());
        assert_eq!(draft.title, "");

        let product = Product::from_draft(ProductId::new(1), draft, None);
        assert_eq!(product.title, "");
        assert_eq!(product.slug, None);
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_draft_rejects_long_title() {
        let draft = ProductDraft {
            title: "t".repeat(51),
            ..ProductDraft::default()
        };
        assert!(draft.validate().unwrap_err().mentions("title"));
    }

    #[test]
    fn test_draft_rejects_bad_slug() {
        let draft = ProductDraft {
            slug: Some("no spaces!".into()),
            ..ProductDraft::default()
        };
        assert!(draft.validate().unwrap_err().mentions("slug"));
    }

    #[test]
    fn test_patch_slug_semantics() {
        let clear: ProductPatch = serde_json::from_str(r#"{"slug": null}"#).unwrap();
        assert_eq!(clear.slug, Some(None));

        let keep: ProductPatch = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert_eq!(keep.slug, None);

        let mut product = Product::from_draft(
            ProductId::new(1),
            ProductDraft::default(),
            Some("mouse".into()),
        );
        product.apply(keep);
        assert_eq!(product.slug.as_deref(), Some("mouse"));
        product.apply(clear);
        assert_eq!(product.slug, None);
    }

    #[test]
    fn test_apply_overwrites_numbers() {
        let mut product = Product::from_draft(ProductId::new(1), ProductDraft::default(), None);
        product.apply(ProductPatch {
            price: Some(2999),
            quantity: Some(12),
            ..ProductPatch::default()
        });
        assert_eq!(product.price, 2999);
        assert_eq!(product.quantity, 12);
        assert!(product.is_in_stock());
    }
}
