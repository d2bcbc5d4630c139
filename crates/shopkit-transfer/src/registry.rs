//! The entity-to-exposed-fields mapping.
//!
//! Built once at startup and passed by reference to projection; nothing
//! consults an ambient global.

use shopkit_model::EntityKind;

/// Which fields of an entity the wire surface carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSet {
    /// Project every field the record serializes.
    All,
    /// Project exactly these wire names.
    Explicit(&'static [&'static str]),
}

impl FieldSet {
    /// Whether `name` is part of this set.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            FieldSet::All => true,
            FieldSet::Explicit(names) => names.contains(&name),
        }
    }
}

/// Exposed-field allowlists, one per entity kind.
///
/// Kinds without an explicit list fall back to [`FieldSet::All`].
#[derive(Debug, Clone)]
pub struct TransferRegistry {
    entries: Vec<(EntityKind, FieldSet)>,
}

impl TransferRegistry {
    /// The catalog's standard wire surface.
    pub fn new() -> Self {
        Self {
            entries: vec![
                (
                    EntityKind::Product,
                    FieldSet::Explicit(&[
                        "id",
                        "image",
                        "title",
                        "description",
                        "rating",
                        "manufacturer",
                        "price",
                        "quantity",
                        "slug",
                    ]),
                ),
                (
                    EntityKind::Category,
                    FieldSet::Explicit(&["id", "name", "products", "slug", "description"]),
                ),
                (
                    EntityKind::Image,
                    FieldSet::Explicit(&["id", "comment", "product", "url"]),
                ),
                (EntityKind::Purchase, FieldSet::Explicit(&["date", "id"])),
                (
                    EntityKind::Coupon,
                    FieldSet::Explicit(&[
                        "expiration",
                        "usage_count",
                        "created_at",
                        "updated_at",
                        "id",
                    ]),
                ),
            ],
        }
    }

    /// The field set exposed for `kind`.
    pub fn field_set(&self, kind: EntityKind) -> FieldSet {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, set)| *set)
            .unwrap_or(FieldSet::All)
    }
}

impl Default for TransferRegistry {
    fn default() -> Self {
        Self::new()
    }
}
