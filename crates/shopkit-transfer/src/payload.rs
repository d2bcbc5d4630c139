//! Inbound payload screening.
//!
//! Payloads are cleaned against the entity's schema before they ever reach
//! a typed draft or patch: unknown and read-only fields are dropped, the
//! rest are checked for JSON type and content constraints, and on create
//! every required field must be present. All problems are reported in one
//! [`ValidationError`].

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use shopkit_model::decimal::validate_decimal;
use shopkit_model::{EntityKind, EntitySchema, FieldSpec, FieldType, ValidationError};

/// Whether a payload creates a record or amends one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    /// Required fields must be present.
    Create,
    /// Any subset of writable fields may appear.
    Update,
}

/// Clean `payload` against `kind`'s schema.
///
/// Returns the object with unknown and read-only fields removed, ready to
/// deserialize into the entity's draft or patch type.
pub fn screen(
    kind: EntityKind,
    payload: &Value,
    mode: ScreenMode,
) -> Result<Value, ValidationError> {
    let object = payload
        .as_object()
        .ok_or_else(|| ValidationError::non_field("expected a JSON object"))?;

    let schema = EntitySchema::for_kind(kind);
    let mut errors = ValidationError::new();
    let mut cleaned = Map::new();

    for (name, value) in object {
        let spec = match schema.field(name.as_str()) {
            Some(spec) => spec,
            // Unknown fields fall away without complaint.
            None => continue,
        };
        if !spec.is_writable() {
            continue;
        }
        if value.is_null() {
            if spec.nullable {
                cleaned.insert(name.clone(), Value::Null);
            } else {
                errors.push(spec.name, "may not be null");
            }
            continue;
        }
        check_value(&mut errors, spec, value);
        cleaned.insert(name.clone(), value.clone());
    }

    if mode == ScreenMode::Create {
        for spec in schema.required_fields() {
            // A field rejected above already has its complaint.
            if !cleaned.contains_key(spec.name) && !errors.mentions(spec.name) {
                errors.push(spec.name, "this field is required");
            }
        }
    }

    errors.into_result()?;
    Ok(Value::Object(cleaned))
}

/// Check one non-null value against its field's declared type and bounds.
fn check_value(errors: &mut ValidationError, spec: &FieldSpec, value: &Value) {
    match spec.ty {
        FieldType::Integer | FieldType::Reference(_) => {
            if value.as_i64().is_none() {
                errors.push(spec.name, format!("must be {}", spec.ty.describe()));
            }
        }
        FieldType::Boolean => {
            if !value.is_boolean() {
                errors.push(spec.name, "must be a boolean");
            }
        }
        FieldType::Text { .. }
        | FieldType::Url { .. }
        | FieldType::Slug { .. }
        | FieldType::Choice { .. } => match value.as_str() {
            Some(s) => spec.check_str(errors, s),
            None => errors.push(spec.name, format!("must be {}", spec.ty.describe())),
        },
        FieldType::Decimal {
            max_digits,
            decimal_places,
        } => {
            // Numbers are accepted through their shortest textual form,
            // matching how the fixed-point types deserialize them.
            let text = match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            };
            match text {
                Some(text) => {
                    if let Err(err) = validate_decimal(&text, max_digits, decimal_places) {
                        errors.push(spec.name, err.to_string());
                    }
                }
                None => errors.push(spec.name, "must be a decimal string"),
            }
        }
        FieldType::Date => {
            let ok = value
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                .is_some();
            if !ok {
                errors.push(spec.name, "not a valid date, expected YYYY-MM-DD");
            }
        }
        FieldType::DateTime => {
            let ok = value
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .is_some();
            if !ok {
                errors.push(spec.name, "not a valid timestamp, expected RFC 3339");
            }
        }
        FieldType::ReferenceList(_) => {
            let ok = value
                .as_array()
                .is_some_and(|items| items.iter().all(|v| v.as_i64().is_some()));
            if !ok {
                errors.push(spec.name, format!("must be {}", spec.ty.describe()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_screen_rejects_non_objects() {
        let err = screen(EntityKind::Product, &json!([1, 2]), ScreenMode::Create).unwrap_err();
        assert!(err.mentions("non_field_errors"));
    }

    #[test]
    fn test_screen_strips_unknown_and_read_only() {
        let payload = json!({
            "title": "Mouse",
            "id": 99,
            "warehouse": "east",
        });
        let cleaned = screen(EntityKind::Product, &payload, ScreenMode::Create).unwrap();
        let object = cleaned.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["title"], json!("Mouse"));
    }

    #[test]
    fn test_screen_checks_json_types() {
        let payload = json!({
            "title": 42,
            "price": "cheap",
            "quantity": 1.5,
        });
        let err = screen(EntityKind::Product, &payload, ScreenMode::Update).unwrap_err();
        assert!(err.mentions("title"));
        assert!(err.mentions("price"));
        assert!(err.mentions("quantity"));
    }

    #[test]
    fn test_screen_requires_fields_on_create_only() {
        let err = screen(EntityKind::Category, &json!({}), ScreenMode::Create).unwrap_err();
        assert!(err.mentions("name"));

        assert!(screen(EntityKind::Category, &json!({}), ScreenMode::Update).is_ok());
    }

    #[test]
    fn test_screen_null_needs_nullable() {
        let cleaned = screen(
            EntityKind::Product,
            &json!({"slug": null}),
            ScreenMode::Update,
        )
        .unwrap();
        assert!(cleaned.as_object().unwrap()["slug"].is_null());

        let err = screen(
            EntityKind::Product,
            &json!({"title": null}),
            ScreenMode::Update,
        )
        .unwrap_err();
        assert!(err.mentions("title"));
    }

    #[test]
    fn test_screen_decimal_budget() {
        let payload = json!({"unit_price": "12.345"});
        let err = screen(EntityKind::CartItem, &payload, ScreenMode::Update).unwrap_err();
        assert!(err.mentions("unit_price"));

        let payload = json!({"unit_price": 12.5});
        assert!(screen(EntityKind::CartItem, &payload, ScreenMode::Update).is_ok());
    }

    #[test]
    fn test_screen_choice_membership() {
        let err = screen(
            EntityKind::Profile,
            &json!({"status": "banned"}),
            ScreenMode::Update,
        )
        .unwrap_err();
        assert!(err.mentions("status"));
    }

    #[test]
    fn test_screen_reference_list() {
        let cleaned = screen(
            EntityKind::Category,
            &json!({"name": "Electronics", "products": [1, 2]}),
            ScreenMode::Create,
        )
        .unwrap();
        assert_eq!(cleaned.as_object().unwrap()["products"], json!([1, 2]));

        let err = screen(
            EntityKind::Category,
            &json!({"name": "Electronics", "products": ["x"]}),
            ScreenMode::Create,
        )
        .unwrap_err();
        assert!(err.mentions("products"));
    }

    #[test]
    fn test_screen_timestamps() {
        let payload = json!({"expiration": "2027-01-01T00:00:00Z"});
        assert!(screen(EntityKind::Coupon, &payload, ScreenMode::Create).is_ok());

        let err = screen(
            EntityKind::Coupon,
            &json!({"expiration": "tomorrow"}),
            ScreenMode::Create,
        )
        .unwrap_err();
        assert!(err.mentions("expiration"));
    }
}
