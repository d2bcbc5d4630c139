//! Wire surface for the shopkit catalog.
//!
//! Sits between external JSON payloads and the typed store:
//!
//! - a [`TransferRegistry`] declaring which fields each entity exposes
//! - [`project`] / [`project_category`] for record-to-JSON projection
//! - [`screen`] for cleaning and validating inbound payloads
//! - [`Api`], the CRUD façade addressed by numeric id or slug
//!
//! # Example
//!
//! ```rust,ignore
//! use shopkit_transfer::{Api, ResourceKey};
//! use shopkit_model::EntityKind;
//! use serde_json::json;
//!
//! let mut api = Api::new();
//!
//! api.create(EntityKind::Product, &json!({
//!     "title": "Wireless Mouse",
//!     "price": 2499,
//!     "quantity": 10,
//! }))?;
//!
//! let mouse = api.retrieve(
//!     EntityKind::Product,
//!     &ResourceKey::Slug("wireless-mouse".into()),
//! )?;
//! assert_eq!(mouse["price"], json!(2499));
//! ```

mod api;
mod error;
mod payload;
mod project;
mod registry;

pub use api::{Api, ResourceKey};
pub use error::TransferError;
pub use payload::{screen, ScreenMode};
pub use project::{project, project_category};
pub use registry::{FieldSet, TransferRegistry};
