//! Product imagery.

use crate::entity::EntityKind;
use crate::error::ValidationError;
use crate::ids::{ImageId, ProductId};
use crate::schema::EntitySchema;
use serde::{Deserialize, Serialize};

/// An image attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    /// Unique image identifier.
    pub id: ImageId,
    /// Owning product.
    pub product: ProductId,
    /// Image location.
    pub url: String,
    /// Caption or alt text.
    pub comment: String,
}

impl Image {
    /// Materialize a validated draft into a stored record.
    pub fn from_draft(id: ImageId, draft: ImageDraft) -> Self {
        Self {
            id,
            product: draft.product,
            url: draft.url,
            comment: draft.comment,
        }
    }

    /// Overwrite the fields a patch carries.
    pub fn apply(&mut self, patch: ImagePatch) {
        if let Some(v) = patch.product {
            self.product = v;
        }
        if let Some(v) = patch.url {
            self.url = v;
        }
        if let Some(v) = patch.comment {
            self.comment = v;
        }
    }
}

/// Inbound fields for creating an [`Image`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageDraft {
    pub product: ProductId,
    pub url: String,
    pub comment: String,
}

impl Default for ImageDraft {
    fn default() -> Self {
        Self {
            product: ProductId::new(0),
            url: String::new(),
            comment: String::new(),
        }
    }
}

impl ImageDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Image);
        let mut errors = ValidationError::new();
        schema.check_str(&mut errors, "url", &self.url);
        schema.check_str(&mut errors, "comment", &self.comment);
        errors.into_result()
    }
}

/// Partial update for an [`Image`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImagePatch {
    pub product: Option<ProductId>,
    pub url: Option<String>,
    pub comment: Option<String>,
}

impl ImagePatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Image);
        let mut errors = ValidationError::new();
        if let Some(v) = &self.url {
            schema.check_str(&mut errors, "url", v);
        }
        if let Some(v) = &self.comment {
            schema.check_str(&mut errors, "comment", v);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_validation() {
        let draft = ImageDraft {
            product: ProductId::new(1),
            url: "cdn/products/1/front.png".into(),
            comment: String::new(),
        };
        assert!(draft.validate().is_ok());

        let long = ImageDraft {
            url: "u".repeat(151),
            ..draft
        };
        assert!(long.validate().unwrap_err().mentions("url"));
    }

    #[test]
    fn test_apply() {
        let mut image = Image::from_draft(ImageId::new(1), ImageDraft::default());
        image.apply(ImagePatch {
            url: Some("cdn/products/1/back.png".into()),
            ..ImagePatch::default()
        });
        assert_eq!(image.url, "cdn/products/1/back.png");
        assert_eq!(image.product, ProductId::new(0));
    }
}
