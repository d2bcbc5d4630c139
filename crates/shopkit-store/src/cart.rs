//! Cart line operations.

use crate::error::StoreError;
use crate::store::{missing_ref, Store};
use shopkit_model::prelude::*;

impl Store {
    /// Create a cart line. Both the product and the user must exist.
    pub fn create_cart_item(&mut self, draft: CartItemDraft) -> Result<CartItem, StoreError> {
        let mut errors = draft.validate().err().unwrap_or_default();
        if !self.products.contains(draft.product.get()) {
            missing_ref(&mut errors, "product", draft.product);
        }
        if !self.users.contains(draft.user.get()) {
            missing_ref(&mut errors, "user", draft.user);
        }
        errors.into_result()?;
        let item = self
            .cart_items
            .insert_with(|id| CartItem::from_draft(CartItemId::new(id), draft));
        tracing::debug!("created cart line {} for user {}", item.id, item.user);
        Ok(item)
    }

    /// Fetch a cart line by id.
    pub fn cart_item(&self, id: CartItemId) -> Result<&CartItem, StoreError> {
        self.cart_items
            .get(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::CartItem, id))
    }

    /// All cart lines in id order.
    pub fn cart_items(&self) -> impl Iterator<Item = &CartItem> {
        self.cart_items.values()
    }

    /// Apply a partial update.
    pub fn update_cart_item(
        &mut self,
        id: CartItemId,
        patch: CartItemPatch,
    ) -> Result<CartItem, StoreError> {
        if !self.cart_items.contains(id.get()) {
            return Err(StoreError::not_found(EntityKind::CartItem, id));
        }
        let mut errors = patch.validate().err().unwrap_or_default();
        if let Some(product) = patch.product {
            if !self.products.contains(product.get()) {
                missing_ref(&mut errors, "product", product);
            }
        }
        if let Some(user) = patch.user {
            if !self.users.contains(user.get()) {
                missing_ref(&mut errors, "user", user);
            }
        }
        errors.into_result()?;
        let item = self
            .cart_items
            .get_mut(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::CartItem, id))?;
        item.apply(patch);
        tracing::debug!("updated cart line {}", id);
        Ok(item.clone())
    }

    /// Delete a cart line and the transactions that settled it.
    pub fn delete_cart_item(&mut self, id: CartItemId) -> Result<(), StoreError> {
        if self.cart_items.remove(id.get()).is_none() {
            return Err(StoreError::not_found(EntityKind::CartItem, id));
        }
        let transactions = self.transactions.extract_where(|t| t.shoppingcart == id);
        tracing::debug!(
            "deleted cart line {} ({} transactions)",
            id,
            transactions.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(store: &mut Store) -> (ProductId, UserId) {
        let product = store
            .create_product(ProductDraft {
                title: "Mouse".into(),
                ..ProductDraft::default()
            })
            .unwrap();
        let user = store
            .create_user(UserDraft {
                username: "ada".into(),
                ..UserDraft::default()
            })
            .unwrap();
        (product.id, user.id)
    }

    #[test]
    fn test_create_requires_both_references() {
        let mut store = Store::new();
        let err = store.create_cart_item(CartItemDraft::default()).unwrap_err();
        match err {
            StoreError::Validation(v) => {
                assert!(v.mentions("product"));
                assert!(v.mentions("user"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_create_and_update() {
        let mut store = Store::new();
        let (product, user) = seed(&mut store);

        let item = store
            .create_cart_item(CartItemDraft {
                product,
                user,
                quantity: 1,
                unit_price: Price::parse("19.99").unwrap(),
                tracking: String::new(),
            })
            .unwrap();
        assert_eq!(item.id, CartItemId::new(1));

        let updated = store
            .update_cart_item(
                item.id,
                CartItemPatch {
                    quantity: Some(3),
                    tracking: Some("PKG-001".into()),
                    ..CartItemPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.tracking, "PKG-001");
        assert_eq!(updated.unit_price, Price::parse("19.99").unwrap());
    }

    #[test]
    fn test_unit_price_budget_enforced() {
        let mut store = Store::new();
        let (product, user) = seed(&mut store);
        let err = store
            .create_cart_item(CartItemDraft {
                product,
                user,
                quantity: 1,
                unit_price: Price::parse("123456789.00").unwrap(),
                tracking: String::new(),
            })
            .unwrap_err();
        match err {
            StoreError::Validation(v) => assert!(v.mentions("unit_price")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
