//! Newtype IDs for type-safe record keys.
//!
//! Every stored record is addressed by an opaque numeric key assigned by the
//! backing store. Using newtypes prevents accidentally mixing up different
//! key types, e.g. passing a `ProductId` where a `UserId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs over numeric keys.
macro_rules! define_id {
    ($name:ident) => {
        /// An opaque numeric record key.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw key.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw numeric key.
            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

// Define all ID types
define_id!(UserId);
define_id!(ProfileId);
define_id!(ProductId);
define_id!(CategoryId);
define_id!(ImageId);
define_id!(RatingId);
define_id!(CartItemId);
define_id!(SpecialId);
define_id!(CouponId);
define_id!(PurchaseId);
define_id!(TransactionId);
define_id!(SearchId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = ProductId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(i64::from(id), 42);
    }

    #[test]
    fn test_id_from_raw() {
        let id: UserId = 7.into();
        assert_eq!(id, UserId::new(7));
    }

    #[test]
    fn test_id_display() {
        let id = CategoryId::new(13);
        assert_eq!(format!("{}", id), "13");
    }

    #[test]
    fn test_id_serializes_as_number() {
        let id = ProductId::new(10);
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!(10));

        let back: ProductId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_ordering() {
        assert!(RatingId::new(1) < RatingId::new(2));
    }
}
