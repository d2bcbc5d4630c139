//! In-memory backing store for the shopkit catalog.
//!
//! Holds every record type from `shopkit_model` in id-ordered tables and
//! enforces the rules the records themselves cannot see: slug and username
//! uniqueness, referential integrity on create and update, and cascade
//! deletion along the ownership graph.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopkit_store::Store;
//! use shopkit_model::prelude::*;
//!
//! let mut store = Store::new();
//!
//! let product = store.create_product(ProductDraft {
//!     title: "Wireless Mouse".into(),
//!     price: 2499,
//!     quantity: 10,
//!     ..ProductDraft::default()
//! })?;
//! assert_eq!(product.slug.as_deref(), Some("wireless-mouse"));
//!
//! // Deleting the product takes its images, ratings, cart lines and
//! // transactions with it.
//! store.delete_product(product.id)?;
//! ```

mod account;
mod cart;
mod catalog;
mod error;
mod order;
mod promo;
mod search;
mod store;
mod table;

pub use error::StoreError;
pub use store::Store;
pub use table::Table;
