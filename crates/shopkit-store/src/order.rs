//! Purchase and transaction operations.

use crate::error::StoreError;
use crate::store::{missing_ref, Store};
use chrono::Utc;
use shopkit_model::prelude::*;

impl Store {
    // ---- purchases ----

    /// Create a purchase. Its date is the creation instant; the payload
    /// carries nothing client-settable.
    pub fn create_purchase(&mut self, draft: PurchaseDraft) -> Result<Purchase, StoreError> {
        let now = Utc::now();
        let purchase = self
            .purchases
            .insert_with(|id| Purchase::from_draft(PurchaseId::new(id), draft, now));
        tracing::debug!("created purchase {}", purchase.id);
        Ok(purchase)
    }

    /// Fetch a purchase by id.
    pub fn purchase(&self, id: PurchaseId) -> Result<&Purchase, StoreError> {
        self.purchases
            .get(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Purchase, id))
    }

    /// All purchases in id order.
    pub fn purchases(&self) -> impl Iterator<Item = &Purchase> {
        self.purchases.values()
    }

    /// Accept a partial update. Every purchase field is read-only, so the
    /// record comes back unchanged.
    pub fn update_purchase(
        &mut self,
        id: PurchaseId,
        _patch: PurchasePatch,
    ) -> Result<Purchase, StoreError> {
        self.purchases
            .get(id.get())
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Purchase, id))
    }

    /// Delete a purchase and the transactions that settled under it.
    pub fn delete_purchase(&mut self, id: PurchaseId) -> Result<(), StoreError> {
        if self.purchases.remove(id.get()).is_none() {
            return Err(StoreError::not_found(EntityKind::Purchase, id));
        }
        let transactions = self.transactions.extract_where(|t| t.purchase == id);
        tracing::debug!(
            "deleted purchase {} ({} transactions)",
            id,
            transactions.len()
        );
        Ok(())
    }

    // ---- transactions ----

    /// Create a transaction. All five references must name existing
    /// records; every dangling one is reported in the same error.
    pub fn create_transaction(
        &mut self,
        draft: TransactionDraft,
    ) -> Result<Transaction, StoreError> {
        let mut errors = draft.validate().err().unwrap_or_default();
        if !self.products.contains(draft.product.get()) {
            missing_ref(&mut errors, "product", draft.product);
        }
        if !self.specials.contains(draft.special.get()) {
            missing_ref(&mut errors, "special", draft.special);
        }
        if !self.cart_items.contains(draft.shoppingcart.get()) {
            missing_ref(&mut errors, "shoppingcart", draft.shoppingcart);
        }
        if !self.coupons.contains(draft.coupon.get()) {
            missing_ref(&mut errors, "coupon", draft.coupon);
        }
        if !self.purchases.contains(draft.purchase.get()) {
            missing_ref(&mut errors, "purchase", draft.purchase);
        }
        errors.into_result()?;
        let now = Utc::now();
        let tx = self
            .transactions
            .insert_with(|id| Transaction::from_draft(TransactionId::new(id), draft, now));
        tracing::debug!("created transaction {} under purchase {}", tx.id, tx.purchase);
        Ok(tx)
    }

    /// Fetch a transaction by id.
    pub fn transaction(&self, id: TransactionId) -> Result<&Transaction, StoreError> {
        self.transactions
            .get(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Transaction, id))
    }

    /// All transactions in id order.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.values()
    }

    /// Apply a partial update. Re-pointed references must exist.
    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> Result<Transaction, StoreError> {
        if !self.transactions.contains(id.get()) {
            return Err(StoreError::not_found(EntityKind::Transaction, id));
        }
        let mut errors = ValidationError::new();
        if let Some(product) = patch.product {
            if !self.products.contains(product.get()) {
                missing_ref(&mut errors, "product", product);
            }
        }
        if let Some(special) = patch.special {
            if !self.specials.contains(special.get()) {
                missing_ref(&mut errors, "special", special);
            }
        }
        if let Some(cart) = patch.shoppingcart {
            if !self.cart_items.contains(cart.get()) {
                missing_ref(&mut errors, "shoppingcart", cart);
            }
        }
        if let Some(coupon) = patch.coupon {
            if !self.coupons.contains(coupon.get()) {
                missing_ref(&mut errors, "coupon", coupon);
            }
        }
        if let Some(purchase) = patch.purchase {
            if !self.purchases.contains(purchase.get()) {
                missing_ref(&mut errors, "purchase", purchase);
            }
        }
        errors.into_result()?;
        let now = Utc::now();
        let tx = self
            .transactions
            .get_mut(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Transaction, id))?;
        tx.apply(patch);
        tx.updated_at = now;
        tracing::debug!("updated transaction {}", id);
        Ok(tx.clone())
    }

    /// Delete a transaction. Nothing references transactions.
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<(), StoreError> {
        if self.transactions.remove(id.get()).is_none() {
            return Err(StoreError::not_found(EntityKind::Transaction, id));
        }
        tracing::debug!("deleted transaction {}", id);
        Ok(())
    }
}
