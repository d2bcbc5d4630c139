//! Promotions: per-product specials and standalone coupons.

use crate::decimal::Percent;
use crate::entity::EntityKind;
use crate::error::ValidationError;
use crate::ids::{CouponId, ProductId, SpecialId};
use crate::schema::EntitySchema;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time-boxed percentage discount on one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Special {
    /// Unique special identifier.
    pub id: SpecialId,
    /// Discounted product.
    pub product: ProductId,
    /// When the discount stops applying.
    pub expiration: DateTime<Utc>,
    /// Discount rate in tenths of a percent.
    pub percentage: Percent,
    /// Set once when the record is created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update.
    pub updated_at: DateTime<Utc>,
}

impl Special {
    /// Materialize a validated draft into a stored record. An omitted
    /// expiration defaults to the creation instant.
    pub fn from_draft(id: SpecialId, draft: SpecialDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            product: draft.product,
            expiration: draft.expiration.unwrap_or(now),
            percentage: draft.percentage,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields a patch carries.
    pub fn apply(&mut self, patch: SpecialPatch) {
        if let Some(v) = patch.product {
            self.product = v;
        }
        if let Some(v) = patch.expiration {
            self.expiration = v;
        }
        if let Some(v) = patch.percentage {
            self.percentage = v;
        }
    }

    /// Whether the discount has lapsed as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }
}

/// Inbound fields for creating a [`Special`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpecialDraft {
    pub product: ProductId,
    /// Omit to expire at the creation instant.
    pub expiration: Option<DateTime<Utc>>,
    pub percentage: Percent,
}

impl Default for SpecialDraft {
    fn default() -> Self {
        Self {
            product: ProductId::new(0),
            expiration: None,
            percentage: Percent::zero(),
        }
    }
}

impl SpecialDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Special);
        let mut errors = ValidationError::new();
        schema.check_digits(&mut errors, "percentage", self.percentage.digit_count());
        errors.into_result()
    }
}

/// Partial update for a [`Special`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpecialPatch {
    pub product: Option<ProductId>,
    pub expiration: Option<DateTime<Utc>>,
    pub percentage: Option<Percent>,
}

impl SpecialPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Special);
        let mut errors = ValidationError::new();
        if let Some(v) = &self.percentage {
            schema.check_digits(&mut errors, "percentage", v.digit_count());
        }
        errors.into_result()
    }
}

/// A discount token, redeemable until it expires.
///
/// Eligibility and redemption rules live outside this layer; the record
/// only tracks the token and how often it has been used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    /// Unique coupon identifier.
    pub id: CouponId,
    /// When the token stops being redeemable.
    pub expiration: DateTime<Utc>,
    /// Times the token has been applied.
    pub usage_count: i64,
    /// Set once when the record is created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update.
    pub updated_at: DateTime<Utc>,
}

impl Coupon {
    /// Materialize a validated draft into a stored record. An omitted
    /// expiration defaults to the creation instant.
    pub fn from_draft(id: CouponId, draft: CouponDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            expiration: draft.expiration.unwrap_or(now),
            usage_count: draft.usage_count,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields a patch carries.
    pub fn apply(&mut self, patch: CouponPatch) {
        if let Some(v) = patch.expiration {
            self.expiration = v;
        }
        if let Some(v) = patch.usage_count {
            self.usage_count = v;
        }
    }

    /// Whether the token has lapsed as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }
}

/// Inbound fields for creating a [`Coupon`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CouponDraft {
    /// Omit to expire at the creation instant.
    pub expiration: Option<DateTime<Utc>>,
    pub usage_count: i64,
}

/// Partial update for a [`Coupon`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CouponPatch {
    pub expiration: Option<DateTime<Utc>>,
    pub usage_count: Option<i64>,
}
