//! Shopping cart line items.

use crate::decimal::Price;
use crate::entity::EntityKind;
use crate::error::ValidationError;
use crate::ids::{CartItemId, ProductId, UserId};
use crate::schema::EntitySchema;
use serde::{Deserialize, Serialize};

/// One line of a user's cart: a product at a captured unit price.
///
/// There is no cart aggregate; a user's cart is the set of their line
/// items. The unit price is captured at add time so later catalog price
/// changes leave the cart alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Unique line identifier.
    pub id: CartItemId,
    /// Product in the cart.
    pub product: ProductId,
    /// Cart owner.
    pub user: UserId,
    /// Units requested.
    pub quantity: i64,
    /// Price per unit at add time.
    pub unit_price: Price,
    /// Fulfilment tracking reference, once one exists.
    pub tracking: String,
}

impl CartItem {
    /// Materialize a validated draft into a stored record.
    pub fn from_draft(id: CartItemId, draft: CartItemDraft) -> Self {
        Self {
            id,
            product: draft.product,
            user: draft.user,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            tracking: draft.tracking,
        }
    }

    /// Overwrite the fields a patch carries.
    pub fn apply(&mut self, patch: CartItemPatch) {
        if let Some(v) = patch.product {
            self.product = v;
        }
        if let Some(v) = patch.user {
            self.user = v;
        }
        if let Some(v) = patch.quantity {
            self.quantity = v;
        }
        if let Some(v) = patch.unit_price {
            self.unit_price = v;
        }
        if let Some(v) = patch.tracking {
            self.tracking = v;
        }
    }

    /// Line total in the unit price's scale, or `None` when the product
    /// leaves the representable range.
    pub fn line_total(&self) -> Option<Price> {
        self.unit_price
            .scaled()
            .checked_mul(self.quantity)
            .map(Price::from_scaled)
    }
}

/// Inbound fields for creating a [`CartItem`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CartItemDraft {
    pub product: ProductId,
    pub user: UserId,
    pub quantity: i64,
    pub unit_price: Price,
    pub tracking: String,
}

impl Default for CartItemDraft {
    fn default() -> Self {
        Self {
            product: ProductId::new(0),
            user: UserId::new(0),
            quantity: 0,
            unit_price: Price::zero(),
            tracking: String::new(),
        }
    }
}

impl CartItemDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::CartItem);
        let mut errors = ValidationError::new();
        schema.check_str(&mut errors, "tracking", &self.tracking);
        schema.check_digits(&mut errors, "unit_price", self.unit_price.digit_count());
        errors.into_result()
    }
}

/// Partial update for a [`CartItem`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CartItemPatch {
    pub product: Option<ProductId>,
    pub user: Option<UserId>,
    pub quantity: Option<i64>,
    pub unit_price: Option<Price>,
    pub tracking: Option<String>,
}

impl CartItemPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::CartItem);
        let mut errors = ValidationError::new();
        if let Some(v) = &self.tracking {
            schema.check_str(&mut errors, "tracking", v);
        }
        if let Some(v) = &self.unit_price {
            schema.check_digits(&mut errors, "unit_price", v.digit_count());
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_validation() {
        let draft = CartItemDraft {
            product: ProductId::new(1),
            user: UserId::new(1),
            quantity: 2,
            unit_price: Price::parse("19.99").unwrap(),
            tracking: String::new(),
        };
        assert!(draft.validate().is_ok());

        let over_budget = CartItemDraft {
            unit_price: Price::parse("99999999999.00").unwrap(),
            ..draft
        };
        assert!(over_budget.validate().unwrap_err().mentions("unit_price"));
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::from_draft(
            CartItemId::new(1),
            CartItemDraft {
                quantity: 3,
                unit_price: Price::parse("19.99").unwrap(),
                ..CartItemDraft::default()
            },
        );
        assert_eq!(item.line_total(), Some(Price::parse("59.97").unwrap()));
    }

    #[test]
    fn test_line_total_overflow_is_none() {
        let item = CartItem::from_draft(
            CartItemId::new(1),
            CartItemDraft {
                quantity: i64::MAX,
                unit_price: Price::parse("2.00").unwrap(),
                ..CartItemDraft::default()
            },
        );
        assert_eq!(item.line_total(), None);
    }

    #[test]
    fn test_unit_price_wire_form() {
        let draft: CartItemDraft =
            serde_json::from_str(r#"{"product": 1, "user": 1, "unit_price": "12.50"}"#).unwrap();
        assert_eq!(draft.unit_price, Price::parse("12.50").unwrap());

        let item = CartItem::from_draft(CartItemId::new(7), draft);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["unit_price"], serde_json::json!("12.50"));
    }
}
