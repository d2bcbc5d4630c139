//! The store proper: one typed table per entity kind behind a single façade.

use crate::table::Table;
use shopkit_model::prelude::*;
use std::collections::BTreeSet;
use std::fmt;

/// In-memory backing store for the whole catalog.
///
/// Every mutating operation takes `&mut self`, validates before touching
/// any row, and either fully applies or leaves the store unchanged. Reads
/// list in id order. Deletes cascade to dependent records within the same
/// call.
///
/// # Example
///
/// ```rust,ignore
/// let mut store = Store::new();
/// let product = store.create_product(ProductDraft {
///     title: "Wireless Mouse".to_string(),
///     ..ProductDraft::default()
/// })?;
/// assert_eq!(product.slug.as_deref(), Some("wireless-mouse"));
/// store.delete_product(product.id)?;
/// ```
pub struct Store {
    pub(crate) users: Table<User>,
    pub(crate) profiles: Table<Profile>,
    pub(crate) products: Table<Product>,
    pub(crate) categories: Table<Category>,
    pub(crate) images: Table<Image>,
    pub(crate) ratings: Table<Rating>,
    pub(crate) cart_items: Table<CartItem>,
    pub(crate) specials: Table<Special>,
    pub(crate) coupons: Table<Coupon>,
    pub(crate) purchases: Table<Purchase>,
    pub(crate) transactions: Table<Transaction>,
    pub(crate) searches: Table<SearchEntry>,
    /// Category membership as (category, product) pairs; pair uniqueness
    /// makes attachment idempotent.
    pub(crate) links: BTreeSet<(CategoryId, ProductId)>,
}

impl Store {
    /// An empty store with every id sequence at 1.
    pub fn new() -> Self {
        Self {
            users: Table::new(),
            profiles: Table::new(),
            products: Table::new(),
            categories: Table::new(),
            images: Table::new(),
            ratings: Table::new(),
            cart_items: Table::new(),
            specials: Table::new(),
            coupons: Table::new(),
            purchases: Table::new(),
            transactions: Table::new(),
            searches: Table::new(),
            links: BTreeSet::new(),
        }
    }

    /// Product ids linked to `category`, in id order.
    pub fn category_products(&self, category: CategoryId) -> Vec<ProductId> {
        self.links
            .iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, p)| *p)
            .collect()
    }

    /// Replace the whole link set of one category.
    pub(crate) fn replace_links(&mut self, category: CategoryId, products: &[ProductId]) {
        self.links.retain(|(c, _)| *c != category);
        for product in products {
            self.links.insert((category, *product));
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Record a dangling-reference complaint against `field`.
pub(crate) fn missing_ref(errors: &mut ValidationError, field: &'static str, id: impl fmt::Display) {
    errors.push(field, format!("referenced record {id} does not exist"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = Store::new();
        assert!(store.users.is_empty());
        assert!(store.products.is_empty());
        assert!(store.links.is_empty());
    }

    #[test]
    fn test_replace_links_is_idempotent() {
        let mut store = Store::new();
        let cat = CategoryId::new(1);
        let p1 = ProductId::new(10);
        let p2 = ProductId::new(11);

        store.replace_links(cat, &[p1, p2, p1]);
        assert_eq!(store.category_products(cat), vec![p1, p2]);

        store.replace_links(cat, &[p2]);
        assert_eq!(store.category_products(cat), vec![p2]);
    }
}
