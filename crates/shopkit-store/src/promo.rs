//! Special and coupon operations.

use crate::error::StoreError;
use crate::store::{missing_ref, Store};
use chrono::Utc;
use shopkit_model::prelude::*;

impl Store {
    // ---- specials ----

    /// Create a special. The product must exist; an omitted expiration
    /// defaults to the creation instant.
    pub fn create_special(&mut self, draft: SpecialDraft) -> Result<Special, StoreError> {
        let mut errors = draft.validate().err().unwrap_or_default();
        if !self.products.contains(draft.product.get()) {
            missing_ref(&mut errors, "product", draft.product);
        }
        errors.into_result()?;
        let now = Utc::now();
        let special = self
            .specials
            .insert_with(|id| Special::from_draft(SpecialId::new(id), draft, now));
        tracing::debug!(
            "created special {} on product {} ({}%)",
            special.id,
            special.product,
            special.percentage
        );
        Ok(special)
    }

    /// Fetch a special by id.
    pub fn special(&self, id: SpecialId) -> Result<&Special, StoreError> {
        self.specials
            .get(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Special, id))
    }

    /// All specials in id order.
    pub fn specials(&self) -> impl Iterator<Item = &Special> {
        self.specials.values()
    }

    /// Apply a partial update.
    pub fn update_special(
        &mut self,
        id: SpecialId,
        patch: SpecialPatch,
    ) -> Result<Special, StoreError> {
        if !self.specials.contains(id.get()) {
            return Err(StoreError::not_found(EntityKind::Special, id));
        }
        let mut errors = patch.validate().err().unwrap_or_default();
        if let Some(product) = patch.product {
            if !self.products.contains(product.get()) {
                missing_ref(&mut errors, "product", product);
            }
        }
        errors.into_result()?;
        let now = Utc::now();
        let special = self
            .specials
            .get_mut(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Special, id))?;
        special.apply(patch);
        special.updated_at = now;
        tracing::debug!("updated special {}", id);
        Ok(special.clone())
    }

    /// Delete a special and the transactions that used it.
    pub fn delete_special(&mut self, id: SpecialId) -> Result<(), StoreError> {
        if self.specials.remove(id.get()).is_none() {
            return Err(StoreError::not_found(EntityKind::Special, id));
        }
        let transactions = self.transactions.extract_where(|t| t.special == id);
        tracing::debug!("deleted special {} ({} transactions)", id, transactions.len());
        Ok(())
    }

    // ---- coupons ----

    /// Create a coupon. An omitted expiration defaults to the creation
    /// instant.
    pub fn create_coupon(&mut self, draft: CouponDraft) -> Result<Coupon, StoreError> {
        let now = Utc::now();
        let coupon = self
            .coupons
            .insert_with(|id| Coupon::from_draft(CouponId::new(id), draft, now));
        tracing::debug!("created coupon {}", coupon.id);
        Ok(coupon)
    }

    /// Fetch a coupon by id.
    pub fn coupon(&self, id: CouponId) -> Result<&Coupon, StoreError> {
        self.coupons
            .get(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Coupon, id))
    }

    /// All coupons in id order.
    pub fn coupons(&self) -> impl Iterator<Item = &Coupon> {
        self.coupons.values()
    }

    /// Apply a partial update.
    pub fn update_coupon(
        &mut self,
        id: CouponId,
        patch: CouponPatch,
    ) -> Result<Coupon, StoreError> {
        let now = Utc::now();
        let coupon = self
            .coupons
            .get_mut(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Coupon, id))?;
        coupon.apply(patch);
        coupon.updated_at = now;
        tracing::debug!("updated coupon {}", id);
        Ok(coupon.clone())
    }

    /// Delete a coupon and the transactions that used it.
    pub fn delete_coupon(&mut self, id: CouponId) -> Result<(), StoreError> {
        if self.coupons.remove(id.get()).is_none() {
            return Err(StoreError::not_found(EntityKind::Coupon, id));
        }
        let transactions = self.transactions.extract_where(|t| t.coupon == id);
        tracing::debug!("deleted coupon {} ({} transactions)", id, transactions.len());
        Ok(())
    }
}
