//! Purchases and the transactions that settle them.

use crate::error::ValidationError;
use crate::ids::{CartItemId, CouponId, ProductId, PurchaseId, SpecialId, TransactionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed checkout event.
///
/// The record is a timestamped anchor; what was bought hangs off it as
/// [`Transaction`] records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Purchase {
    /// Unique purchase identifier.
    pub id: PurchaseId,
    /// When the checkout happened.
    pub date: DateTime<Utc>,
}

impl Purchase {
    /// Materialize a draft into a stored record. Both fields are
    /// system-assigned.
    pub fn from_draft(id: PurchaseId, _draft: PurchaseDraft, now: DateTime<Utc>) -> Self {
        Self { id, date: now }
    }
}

/// Inbound payload for creating a [`Purchase`]. Every field is
/// system-assigned, so there is nothing for a client to supply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PurchaseDraft {}

/// Partial update for a [`Purchase`]. Every field is read-only, so an
/// update is accepted and changes nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PurchasePatch {}

/// One settled line of a purchase: which product, under which special,
/// from which cart line, with which coupon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique transaction identifier.
    pub id: TransactionId,
    /// Product bought.
    pub product: ProductId,
    /// Special in effect.
    pub special: SpecialId,
    /// Cart line this settles.
    pub shoppingcart: CartItemId,
    /// Coupon applied.
    pub coupon: CouponId,
    /// Purchase this line belongs to.
    pub purchase: PurchaseId,
    /// Set once when the record is created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update.
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Materialize a validated draft into a stored record.
    pub fn from_draft(id: TransactionId, draft: TransactionDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            product: draft.product,
            special: draft.special,
            shoppingcart: draft.shoppingcart,
            coupon: draft.coupon,
            purchase: draft.purchase,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields a patch carries.
    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(v) = patch.product {
            self.product = v;
        }
        if let Some(v) = patch.special {
            self.special = v;
        }
        if let Some(v) = patch.shoppingcart {
            self.shoppingcart = v;
        }
        if let Some(v) = patch.coupon {
            self.coupon = v;
        }
        if let Some(v) = patch.purchase {
            self.purchase = v;
        }
    }
}

/// Inbound fields for creating a [`Transaction`]. All five references
/// must name existing records.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransactionDraft {
    pub product: ProductId,
    pub special: SpecialId,
    pub shoppingcart: CartItemId,
    pub coupon: CouponId,
    pub purchase: PurchaseId,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            product: ProductId::new(0),
            special: SpecialId::new(0),
            shoppingcart: CartItemId::new(0),
            coupon: CouponId::new(0),
            purchase: PurchaseId::new(0),
        }
    }
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        // Referential checks happen at the store; the wire shape itself
        // carries no further constraints.
        Ok(())
    }
}

/// Partial update for a [`Transaction`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransactionPatch {
    pub product: Option<ProductId>,
    pub special: Option<SpecialId>,
    pub shoppingcart: Option<CartItemId>,
    pub coupon: Option<CouponId>,
    pub purchase: Option<PurchaseId>,
}
