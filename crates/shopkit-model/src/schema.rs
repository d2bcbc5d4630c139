//! Per-entity field schemas: the constraint tables that drive validation.
//!
//! Every entity's wire shape is declared here as data. The transfer layer
//! walks these tables to screen inbound payloads, and the store re-checks
//! the same constraints at the point of persistence, so neither layer
//! hard-codes per-entity field knowledge.

use crate::account::PROFILE_STATUSES;
use crate::entity::EntityKind;
use crate::error::ValidationError;
use crate::slug;

/// The wire type of a field, with whatever bounds it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A whole number (also the wire form of record ids).
    Integer,
    Boolean,
    /// Free text with a length cap.
    Text { max_length: u32 },
    /// A URL, length-capped, scheme-checked when non-empty.
    Url { max_length: u32 },
    /// A URL-safe handle; `max_length` is `None` for derived slugs whose
    /// uniquifying suffix may outgrow the source field.
    Slug { max_length: Option<u32> },
    /// Fixed-point decimal with a digit budget, e.g. `Decimal { 10, 2 }`.
    Decimal { max_digits: u32, decimal_places: u32 },
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// Timestamp, RFC 3339.
    DateTime,
    /// One value out of a closed set.
    Choice { choices: &'static [&'static str] },
    /// The id of a record of another kind.
    Reference(EntityKind),
    /// A list of ids of records of another kind.
    ReferenceList(EntityKind),
}

impl FieldType {
    /// Short description for error messages, e.g. `"an integer"`.
    pub fn describe(&self) -> &'static str {
        match self {
            FieldType::Integer => "an integer",
            FieldType::Boolean => "a boolean",
            FieldType::Text { .. } => "a string",
            FieldType::Url { .. } => "a URL",
            FieldType::Slug { .. } => "a slug",
            FieldType::Decimal { .. } => "a decimal",
            FieldType::Date => "a date",
            FieldType::DateTime => "a timestamp",
            FieldType::Choice { .. } => "one of the allowed choices",
            FieldType::Reference(_) => "a record id",
            FieldType::ReferenceList(_) => "a list of record ids",
        }
    }
}

/// One field of an entity's wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name.
    pub name: &'static str,
    pub ty: FieldType,
    /// Must be present (and non-null) when creating a record.
    pub required: bool,
    /// System-maintained; client-supplied values are ignored.
    pub read_only: bool,
    /// May hold an explicit null.
    pub nullable: bool,
    /// No two records may share a non-null value.
    pub unique: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
            read_only: false,
            nullable: false,
            unique: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Whether clients may set this field at all.
    pub fn is_writable(&self) -> bool {
        !self.read_only
    }

    /// Check a string value against this field's declared bounds, recording
    /// any problems under the field's wire name.
    ///
    /// Covers blankness of required fields, length caps, URL shape, slug
    /// charset and choice membership. Types whose bounds are not textual
    /// (integers, booleans, references, timestamps) pass untouched.
    pub fn check_str(&self, errors: &mut ValidationError, value: &str) {
        if self.required && value.is_empty() {
            errors.push(self.name, "may not be blank");
            return;
        }
        match self.ty {
            FieldType::Text { max_length } => {
                self.check_len(errors, value, max_length);
            }
            FieldType::Url { max_length } => {
                self.check_len(errors, value, max_length);
                if !value.is_empty() && !is_url(value) {
                    errors.push(self.name, "not a valid URL");
                }
            }
            FieldType::Slug { max_length } => {
                if !slug::is_valid(value) {
                    errors.push(
                        self.name,
                        "not a valid slug: use letters, numbers, hyphens or underscores",
                    );
                }
                if let Some(max) = max_length {
                    self.check_len(errors, value, max);
                }
            }
            FieldType::Choice { choices } => {
                if !choices.contains(&value) {
                    errors.push(self.name, format!("\"{value}\" is not a valid choice"));
                }
            }
            _ => {}
        }
    }

    /// Check a fixed-point value's digit count against this field's budget.
    pub fn check_digits(&self, errors: &mut ValidationError, digits: u32) {
        if let FieldType::Decimal { max_digits, .. } = self.ty {
            if digits > max_digits {
                errors.push(
                    self.name,
                    format!("no more than {max_digits} digit(s) allowed"),
                );
            }
        }
    }

    fn check_len(&self, errors: &mut ValidationError, value: &str, max: u32) {
        if value.chars().count() as u32 > max {
            errors.push(
                self.name,
                format!("no more than {max} character(s) allowed"),
            );
        }
    }
}

/// Minimal URL shape check: a known scheme and a non-empty,
/// whitespace-free remainder.
fn is_url(value: &str) -> bool {
    let rest = ["http://", "https://", "ftp://", "ftps://"]
        .iter()
        .find_map(|scheme| value.strip_prefix(scheme));
    match rest {
        Some(r) => !r.is_empty() && !r.chars().any(char::is_whitespace),
        None => false,
    }
}

/// The full wire shape of one entity kind.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub fields: &'static [FieldSpec],
}

impl EntitySchema {
    /// The schema table for `kind`.
    pub fn for_kind(kind: EntityKind) -> &'static EntitySchema {
        match kind {
            EntityKind::User => &USER,
            EntityKind::Profile => &PROFILE,
            EntityKind::Product => &PRODUCT,
            EntityKind::Category => &CATEGORY,
            EntityKind::Image => &IMAGE,
            EntityKind::Rating => &RATING,
            EntityKind::CartItem => &CART_ITEM,
            EntityKind::Special => &SPECIAL,
            EntityKind::Coupon => &COUPON,
            EntityKind::Purchase => &PURCHASE,
            EntityKind::Transaction => &TRANSACTION,
            EntityKind::Search => &SEARCH,
        }
    }

    /// Look up one field by wire name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The fields that must be present on create.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    /// [`FieldSpec::check_str`] addressed by wire name. Names not in the
    /// table are ignored; call sites and tables are both fixed at compile
    /// time.
    pub fn check_str(&self, errors: &mut ValidationError, name: &str, value: &str) {
        if let Some(spec) = self.field(name) {
            spec.check_str(errors, value);
        }
    }

    /// [`FieldSpec::check_digits`] addressed by wire name.
    pub fn check_digits(&self, errors: &mut ValidationError, name: &str, digits: u32) {
        if let Some(spec) = self.field(name) {
            spec.check_digits(errors, digits);
        }
    }
}

const fn id_field() -> FieldSpec {
    FieldSpec::new("id", FieldType::Integer).read_only()
}

const fn stamp(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldType::DateTime).read_only()
}

static USER: EntitySchema = EntitySchema {
    kind: EntityKind::User,
    fields: &[
        id_field(),
        FieldSpec::new("username", FieldType::Text { max_length: 150 })
            .required()
            .unique(),
        FieldSpec::new("email", FieldType::Text { max_length: 254 }),
        FieldSpec::new("first_name", FieldType::Text { max_length: 150 }),
        FieldSpec::new("last_name", FieldType::Text { max_length: 150 }),
        FieldSpec::new("is_active", FieldType::Boolean),
        stamp("date_joined"),
        FieldSpec::new("last_login", FieldType::DateTime).nullable(),
    ],
};

static PROFILE: EntitySchema = EntitySchema {
    kind: EntityKind::Profile,
    fields: &[
        id_field(),
        FieldSpec::new("user", FieldType::Reference(EntityKind::User))
            .required()
            .unique(),
        FieldSpec::new("picture", FieldType::Url { max_length: 200 }),
        FieldSpec::new("bio", FieldType::Text { max_length: 250 }),
        FieldSpec::new("address", FieldType::Text { max_length: 250 }),
        FieldSpec::new("birth_date", FieldType::Date).nullable(),
        FieldSpec::new("phone_number", FieldType::Text { max_length: 17 }),
        FieldSpec::new(
            "status",
            FieldType::Choice {
                choices: PROFILE_STATUSES,
            },
        ),
        stamp("created_at"),
        stamp("updated_at"),
    ],
};

static PRODUCT: EntitySchema = EntitySchema {
    kind: EntityKind::Product,
    fields: &[
        id_field(),
        FieldSpec::new("image", FieldType::Text { max_length: 150 }),
        FieldSpec::new("title", FieldType::Text { max_length: 50 }),
        FieldSpec::new("description", FieldType::Text { max_length: 1000 }),
        FieldSpec::new("rating", FieldType::Integer),
        FieldSpec::new("manufacturer", FieldType::Text { max_length: 50 }),
        FieldSpec::new("price", FieldType::Integer),
        FieldSpec::new("quantity", FieldType::Integer),
        FieldSpec::new("slug", FieldType::Slug { max_length: None })
            .nullable()
            .unique(),
    ],
};

static CATEGORY: EntitySchema = EntitySchema {
    kind: EntityKind::Category,
    fields: &[
        id_field(),
        FieldSpec::new("name", FieldType::Text { max_length: 150 }).required(),
        FieldSpec::new("description", FieldType::Text { max_length: 1000 }),
        FieldSpec::new(
            "slug",
            FieldType::Slug {
                max_length: Some(150),
            },
        )
        .unique(),
        FieldSpec::new("products", FieldType::ReferenceList(EntityKind::Product)),
        stamp("created_at"),
        stamp("updated_at"),
    ],
};

static IMAGE: EntitySchema = EntitySchema {
    kind: EntityKind::Image,
    fields: &[
        id_field(),
        FieldSpec::new("product", FieldType::Reference(EntityKind::Product)).required(),
        FieldSpec::new("url", FieldType::Text { max_length: 150 }),
        FieldSpec::new("comment", FieldType::Text { max_length: 200 }),
    ],
};

static RATING: EntitySchema = EntitySchema {
    kind: EntityKind::Rating,
    fields: &[
        id_field(),
        FieldSpec::new("product", FieldType::Reference(EntityKind::Product)).required(),
        FieldSpec::new("user", FieldType::Reference(EntityKind::User)).required(),
        FieldSpec::new("rating", FieldType::Integer),
        FieldSpec::new("comment", FieldType::Text { max_length: 200 }),
    ],
};

static CART_ITEM: EntitySchema = EntitySchema {
    kind: EntityKind::CartItem,
    fields: &[
        id_field(),
        FieldSpec::new("product", FieldType::Reference(EntityKind::Product)).required(),
        FieldSpec::new("user", FieldType::Reference(EntityKind::User)).required(),
        FieldSpec::new("quantity", FieldType::Integer),
        FieldSpec::new(
            "unit_price",
            FieldType::Decimal {
                max_digits: 10,
                decimal_places: 2,
            },
        )
        .required(),
        FieldSpec::new("tracking", FieldType::Text { max_length: 150 }),
    ],
};

static SPECIAL: EntitySchema = EntitySchema {
    kind: EntityKind::Special,
    fields: &[
        id_field(),
        FieldSpec::new("product", FieldType::Reference(EntityKind::Product)).required(),
        FieldSpec::new("expiration", FieldType::DateTime),
        FieldSpec::new(
            "percentage",
            FieldType::Decimal {
                max_digits: 2,
                decimal_places: 1,
            },
        ),
        stamp("created_at"),
        stamp("updated_at"),
    ],
};

static COUPON: EntitySchema = EntitySchema {
    kind: EntityKind::Coupon,
    fields: &[
        id_field(),
        FieldSpec::new("expiration", FieldType::DateTime),
        FieldSpec::new("usage_count", FieldType::Integer),
        stamp("created_at"),
        stamp("updated_at"),
    ],
};

static PURCHASE: EntitySchema = EntitySchema {
    kind: EntityKind::Purchase,
    fields: &[id_field(), stamp("date")],
};

static TRANSACTION: EntitySchema = EntitySchema {
    kind: EntityKind::Transaction,
    fields: &[
        id_field(),
        FieldSpec::new("product", FieldType::Reference(EntityKind::Product)).required(),
        FieldSpec::new("special", FieldType::Reference(EntityKind::Special)).required(),
        FieldSpec::new("shoppingcart", FieldType::Reference(EntityKind::CartItem)).required(),
        FieldSpec::new("coupon", FieldType::Reference(EntityKind::Coupon)).required(),
        FieldSpec::new("purchase", FieldType::Reference(EntityKind::Purchase)).required(),
        stamp("created_at"),
        stamp("updated_at"),
    ],
};

static SEARCH: EntitySchema = EntitySchema {
    kind: EntityKind::Search,
    fields: &[
        id_field(),
        FieldSpec::new("user", FieldType::Reference(EntityKind::User)).required(),
        FieldSpec::new("search_term", FieldType::Text { max_length: 50 }),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_schema() {
        for kind in EntityKind::ALL {
            let schema = EntitySchema::for_kind(kind);
            assert_eq!(schema.kind, kind);
            assert!(!schema.fields.is_empty());
        }
    }

    #[test]
    fn test_id_is_read_only_everywhere() {
        for kind in EntityKind::ALL {
            let id = EntitySchema::for_kind(kind).field("id").unwrap();
            assert!(id.read_only, "{kind}: id must be read-only");
            assert!(!id.is_writable());
        }
    }

    #[test]
    fn test_product_slug_is_nullable_and_unique() {
        let slug = EntitySchema::for_kind(EntityKind::Product)
            .field("slug")
            .unwrap();
        assert!(slug.nullable);
        assert!(slug.unique);
        assert!(!slug.required);
    }

    #[test]
    fn test_cart_item_requires_unit_price() {
        let schema = EntitySchema::for_kind(EntityKind::CartItem);
        let required: Vec<_> = schema.required_fields().map(|f| f.name).collect();
        assert_eq!(required, vec!["product", "user", "unit_price"]);
        assert_eq!(
            schema.field("unit_price").unwrap().ty,
            FieldType::Decimal {
                max_digits: 10,
                decimal_places: 2
            }
        );
    }

    #[test]
    fn test_transaction_requires_five_references() {
        let schema = EntitySchema::for_kind(EntityKind::Transaction);
        let refs: Vec<_> = schema
            .fields
            .iter()
            .filter(|f| matches!(f.ty, FieldType::Reference(_)))
            .map(|f| f.name)
            .collect();
        assert_eq!(
            refs,
            vec!["product", "special", "shoppingcart", "coupon", "purchase"]
        );
        assert!(schema
            .required_fields()
            .all(|f| matches!(f.ty, FieldType::Reference(_))));
    }

    #[test]
    fn test_profile_user_is_unique() {
        let user = EntitySchema::for_kind(EntityKind::Profile)
            .field("user")
            .unwrap();
        assert!(user.unique);
        assert!(user.required);
    }

    #[test]
    fn test_unknown_field_lookup() {
        assert!(EntitySchema::for_kind(EntityKind::Coupon)
            .field("discount_code")
            .is_none());
    }

    #[test]
    fn test_check_str_length_cap() {
        let schema = EntitySchema::for_kind(EntityKind::Product);
        let mut errors = ValidationError::new();
        schema.check_str(&mut errors, "title", &"x".repeat(50));
        assert!(errors.is_empty());
        schema.check_str(&mut errors, "title", &"x".repeat(51));
        assert!(errors.mentions("title"));
    }

    #[test]
    fn test_check_str_required_blank() {
        let schema = EntitySchema::for_kind(EntityKind::Category);
        let mut errors = ValidationError::new();
        schema.check_str(&mut errors, "name", "");
        assert!(errors.mentions("name"));
    }

    #[test]
    fn test_check_str_url_shape() {
        let schema = EntitySchema::for_kind(EntityKind::Profile);
        let mut errors = ValidationError::new();
        schema.check_str(&mut errors, "picture", "https://cdn.example.com/a.png");
        schema.check_str(&mut errors, "picture", "");
        assert!(errors.is_empty());
        schema.check_str(&mut errors, "picture", "not a url");
        assert!(errors.mentions("picture"));
    }

    #[test]
    fn test_check_str_choice_membership() {
        let schema = EntitySchema::for_kind(EntityKind::Profile);
        let mut errors = ValidationError::new();
        schema.check_str(&mut errors, "status", "paused");
        assert!(errors.is_empty());
        schema.check_str(&mut errors, "status", "banned");
        assert!(errors.mentions("status"));
    }

    #[test]
    fn test_check_digits_budget() {
        let schema = EntitySchema::for_kind(EntityKind::Special);
        let mut errors = ValidationError::new();
        schema.check_digits(&mut errors, "percentage", 2);
        assert!(errors.is_empty());
        schema.check_digits(&mut errors, "percentage", 3);
        assert!(errors.mentions("percentage"));
    }
}
