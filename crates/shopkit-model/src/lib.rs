//! Entity definitions and field schemas for the shopkit catalog.
//!
//! This crate is the vocabulary of the system:
//!
//! - **Accounts**: users and their profiles
//! - **Catalog**: products, categories, imagery, ratings
//! - **Cart**: shopping cart line items
//! - **Promotions**: per-product specials and coupons
//! - **Orders**: purchases and their settling transactions
//! - **Search**: the query log
//!
//! Each entity comes as a stored record plus a `Draft` (create input) and a
//! `Patch` (partial-update input), with validation driven by the per-entity
//! [`schema`] tables rather than per-field code.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopkit_model::prelude::*;
//!
//! // Describe a product to create
//! let draft = ProductDraft {
//!     title: "Wireless Mouse".to_string(),
//!     price: 2999,
//!     quantity: 40,
//!     ..ProductDraft::default()
//! };
//! draft.validate()?;
//!
//! // The store resolves the id and slug when it persists the draft
//! let product = Product::from_draft(id, draft, Some("wireless-mouse".into()));
//! assert!(product.is_in_stock());
//! ```

pub mod decimal;
pub mod entity;
pub mod error;
pub mod ids;
pub mod patch;
pub mod schema;
pub mod slug;

pub mod account;
pub mod cart;
pub mod catalog;
pub mod order;
pub mod promo;
pub mod search;

pub use decimal::{Percent, Price};
pub use entity::EntityKind;
pub use error::{FieldError, ValidationError};
pub use ids::*;
pub use schema::{EntitySchema, FieldSpec, FieldType};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::decimal::{Percent, Price};
    pub use crate::entity::EntityKind;
    pub use crate::error::{FieldError, ValidationError, NON_FIELD};
    pub use crate::ids::*;
    pub use crate::schema::{EntitySchema, FieldSpec, FieldType};

    // Accounts
    pub use crate::account::{
        Profile, ProfileDraft, ProfilePatch, ProfileStatus, User, UserDraft, UserPatch,
    };

    // Catalog
    pub use crate::catalog::{
        Category, CategoryDraft, CategoryPatch, Image, ImageDraft, ImagePatch, Product,
        ProductDraft, ProductPatch, Rating, RatingDraft, RatingPatch,
    };

    // Cart
    pub use crate::cart::{CartItem, CartItemDraft, CartItemPatch};

    // Promotions
    pub use crate::promo::{Coupon, CouponDraft, CouponPatch, Special, SpecialDraft, SpecialPatch};

    // Orders
    pub use crate::order::{
        Purchase, PurchaseDraft, PurchasePatch, Transaction, TransactionDraft, TransactionPatch,
    };

    // Search
    pub use crate::search::{SearchDraft, SearchEntry, SearchPatch};
}
