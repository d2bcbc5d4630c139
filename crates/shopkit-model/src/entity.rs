//! Entity kinds known to the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every kind of record the catalog stores.
///
/// The wire name (from [`as_str`](EntityKind::as_str)) doubles as the key
/// under which transfer rules and schemas are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    Profile,
    Product,
    Category,
    Image,
    Rating,
    /// Cart line items keep the historical wire name `shoppingcart`.
    #[serde(rename = "shoppingcart")]
    CartItem,
    Special,
    Coupon,
    Purchase,
    Transaction,
    Search,
}

impl EntityKind {
    /// All kinds, in registration order.
    pub const ALL: [EntityKind; 12] = [
        EntityKind::User,
        EntityKind::Profile,
        EntityKind::Product,
        EntityKind::Category,
        EntityKind::Image,
        EntityKind::Rating,
        EntityKind::CartItem,
        EntityKind::Special,
        EntityKind::Coupon,
        EntityKind::Purchase,
        EntityKind::Transaction,
        EntityKind::Search,
    ];

    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Profile => "profile",
            EntityKind::Product => "product",
            EntityKind::Category => "category",
            EntityKind::Image => "image",
            EntityKind::Rating => "rating",
            EntityKind::CartItem => "shoppingcart",
            EntityKind::Special => "special",
            EntityKind::Coupon => "coupon",
            EntityKind::Purchase => "purchase",
            EntityKind::Transaction => "transaction",
            EntityKind::Search => "search",
        }
    }

    /// Parse a wire name back into a kind.
    pub fn from_str(s: &str) -> Option<EntityKind> {
        match s {
            "user" => Some(EntityKind::User),
            "profile" => Some(EntityKind::Profile),
            "product" => Some(EntityKind::Product),
            "category" => Some(EntityKind::Category),
            "image" => Some(EntityKind::Image),
            "rating" => Some(EntityKind::Rating),
            "shoppingcart" => Some(EntityKind::CartItem),
            "special" => Some(EntityKind::Special),
            "coupon" => Some(EntityKind::Coupon),
            "purchase" => Some(EntityKind::Purchase),
            "transaction" => Some(EntityKind::Transaction),
            "search" => Some(EntityKind::Search),
            _ => None,
        }
    }

    /// Name of this kind's resource collection, e.g. `"products"`.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Profile => "profiles",
            EntityKind::Product => "products",
            EntityKind::Category => "categories",
            EntityKind::Image => "images",
            EntityKind::Rating => "ratings",
            EntityKind::CartItem => "shoppingcarts",
            EntityKind::Special => "specials",
            EntityKind::Coupon => "coupons",
            EntityKind::Purchase => "purchases",
            EntityKind::Transaction => "transactions",
            EntityKind::Search => "searches",
        }
    }

    /// Resolve a collection name back to its kind.
    pub fn from_collection(s: &str) -> Option<EntityKind> {
        EntityKind::ALL.into_iter().find(|k| k.collection() == s)
    }

    /// Whether records of this kind carry a slug.
    pub fn has_slug(&self) -> bool {
        matches!(self, EntityKind::Product | EntityKind::Category)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(EntityKind::from_collection(kind.collection()), Some(kind));
        }
        assert_eq!(EntityKind::from_str("warehouse"), None);
        assert_eq!(EntityKind::from_collection("warehouses"), None);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_value(EntityKind::CartItem).unwrap();
        assert_eq!(json, serde_json::json!("shoppingcart"));
    }

    #[test]
    fn test_slug_bearing_kinds() {
        assert!(EntityKind::Product.has_slug());
        assert!(EntityKind::Category.has_slug());
        assert!(!EntityKind::Rating.has_slug());
    }
}
