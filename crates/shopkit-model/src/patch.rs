//! Serde helpers for partial-update payloads.

use serde::{Deserialize, Deserializer};

/// Deserialize a patch field that must distinguish "absent" from "null".
///
/// Pair with `#[serde(default, deserialize_with = "double_option")]` on an
/// `Option<Option<T>>` field: an absent key stays `None` (leave the stored
/// value alone), an explicit `null` becomes `Some(None)` (clear it), and a
/// value becomes `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
