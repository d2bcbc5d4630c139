//! Stored record to wire object projection.

use crate::error::TransferError;
use crate::registry::{FieldSet, TransferRegistry};
use serde::Serialize;
use serde_json::Value;
use shopkit_model::{EntityKind, ProductId};

/// Project a record through the registry, keeping exactly the exposed
/// fields. Relations stay as bare identifiers; nothing is expanded.
pub fn project<T: Serialize>(
    registry: &TransferRegistry,
    kind: EntityKind,
    record: &T,
) -> Result<Value, TransferError> {
    let value = serde_json::to_value(record)?;
    Ok(keep_fields(registry.field_set(kind), value))
}

/// Project a category with its `products` membership list composed in.
///
/// Membership lives in link records rather than on the category itself, so
/// the caller supplies the id list alongside the record.
pub fn project_category<T: Serialize>(
    registry: &TransferRegistry,
    category: &T,
    products: &[ProductId],
) -> Result<Value, TransferError> {
    let mut value = serde_json::to_value(category)?;
    if let Value::Object(map) = &mut value {
        map.insert("products".into(), serde_json::to_value(products)?);
    }
    Ok(keep_fields(registry.field_set(EntityKind::Category), value))
}

fn keep_fields(set: FieldSet, value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(name, _)| set.contains(name))
                .collect(),
        ),
        other => other,
    }
}
