//! The dispatching CRUD façade.

use crate::error::TransferError;
use crate::payload::{screen, ScreenMode};
use crate::project::{project, project_category};
use crate::registry::TransferRegistry;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shopkit_model::prelude::*;
use shopkit_store::{Store, StoreError};

/// How a single resource is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKey {
    /// By numeric identifier.
    Id(i64),
    /// By slug; only products and categories carry one.
    Slug(String),
}

impl From<i64> for ResourceKey {
    fn from(id: i64) -> Self {
        ResourceKey::Id(id)
    }
}

impl From<&str> for ResourceKey {
    fn from(slug: &str) -> Self {
        ResourceKey::Slug(slug.to_string())
    }
}

/// The wire-facing CRUD surface over a [`Store`].
///
/// Each verb screens inbound payloads against the schema tables, hands the
/// cleaned payload to the typed store operation, and projects the result
/// through the exposed-field registry.
///
/// # Example
///
/// ```rust,ignore
/// use shopkit_transfer::{Api, ResourceKey};
/// use shopkit_model::EntityKind;
/// use serde_json::json;
///
/// let mut api = Api::new();
/// let created = api.create(EntityKind::Product, &json!({"title": "Wireless Mouse"}))?;
/// let fetched = api.retrieve(EntityKind::Product, &ResourceKey::Slug("wireless-mouse".into()))?;
/// assert_eq!(created, fetched);
/// ```
pub struct Api {
    store: Store,
    registry: TransferRegistry,
}

impl Api {
    /// A fresh store behind the standard wire surface.
    pub fn new() -> Self {
        Self::with_store(Store::new())
    }

    /// Wrap an existing store.
    pub fn with_store(store: Store) -> Self {
        Self {
            store,
            registry: TransferRegistry::new(),
        }
    }

    /// The backing store, for direct reads.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Create a record of `kind` from a JSON payload.
    pub fn create(&mut self, kind: EntityKind, payload: &Value) -> Result<Value, TransferError> {
        let cleaned = self.screened(kind, payload, ScreenMode::Create)?;
        match kind {
            EntityKind::User => {
                let record = self.store.create_user(parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Profile => {
                let record = self.store.create_profile(parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Product => {
                let record = self.store.create_product(parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Category => {
                let record = self.store.create_category(parse(cleaned)?)?;
                let products = self.store.category_products(record.id);
                project_category(&self.registry, &record, &products)
            }
            EntityKind::Image => {
                let record = self.store.create_image(parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Rating => {
                let record = self.store.create_rating(parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::CartItem => {
                let record = self.store.create_cart_item(parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Special => {
                let record = self.store.create_special(parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Coupon => {
                let record = self.store.create_coupon(parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Purchase => {
                let record = self.store.create_purchase(parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Transaction => {
                let record = self.store.create_transaction(parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Search => {
                let record = self.store.create_search(parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
        }
    }

    /// Fetch one record by id or slug.
    pub fn retrieve(&self, kind: EntityKind, key: &ResourceKey) -> Result<Value, TransferError> {
        let id = self.resolve(kind, key)?;
        match kind {
            EntityKind::User => project(&self.registry, kind, self.store.user(UserId::new(id))?),
            EntityKind::Profile => {
                project(&self.registry, kind, self.store.profile(ProfileId::new(id))?)
            }
            EntityKind::Product => {
                project(&self.registry, kind, self.store.product(ProductId::new(id))?)
            }
            EntityKind::Category => {
                let record = self.store.category(CategoryId::new(id))?;
                let products = self.store.category_products(record.id);
                project_category(&self.registry, record, &products)
            }
            EntityKind::Image => project(&self.registry, kind, self.store.image(ImageId::new(id))?),
            EntityKind::Rating => {
                project(&self.registry, kind, self.store.rating(RatingId::new(id))?)
            }
            EntityKind::CartItem => {
                project(&self.registry, kind, self.store.cart_item(CartItemId::new(id))?)
            }
            EntityKind::Special => {
                project(&self.registry, kind, self.store.special(SpecialId::new(id))?)
            }
            EntityKind::Coupon => {
                project(&self.registry, kind, self.store.coupon(CouponId::new(id))?)
            }
            EntityKind::Purchase => {
                project(&self.registry, kind, self.store.purchase(PurchaseId::new(id))?)
            }
            EntityKind::Transaction => project(
                &self.registry,
                kind,
                self.store.transaction(TransactionId::new(id))?,
            ),
            EntityKind::Search => {
                project(&self.registry, kind, self.store.search(SearchId::new(id))?)
            }
        }
    }

    /// All records of `kind`, in id order.
    pub fn list(&self, kind: EntityKind) -> Result<Vec<Value>, TransferError> {
        match kind {
            EntityKind::User => self
                .store
                .users()
                .map(|r| project(&self.registry, kind, r))
                .collect(),
            EntityKind::Profile => self
                .store
                .profiles()
                .map(|r| project(&self.registry, kind, r))
                .collect(),
            EntityKind::Product => self
                .store
                .products()
                .map(|r| project(&self.registry, kind, r))
                .collect(),
            EntityKind::Category => self
                .store
                .categories()
                .map(|r| {
                    let products = self.store.category_products(r.id);
                    project_category(&self.registry, r, &products)
                })
                .collect(),
            EntityKind::Image => self
                .store
                .images()
                .map(|r| project(&self.registry, kind, r))
                .collect(),
            EntityKind::Rating => self
                .store
                .ratings()
                .map(|r| project(&self.registry, kind, r))
                .collect(),
            EntityKind::CartItem => self
                .store
                .cart_items()
                .map(|r| project(&self.registry, kind, r))
                .collect(),
            EntityKind::Special => self
                .store
                .specials()
                .map(|r| project(&self.registry, kind, r))
                .collect(),
            EntityKind::Coupon => self
                .store
                .coupons()
                .map(|r| project(&self.registry, kind, r))
                .collect(),
            EntityKind::Purchase => self
                .store
                .purchases()
                .map(|r| project(&self.registry, kind, r))
                .collect(),
            EntityKind::Transaction => self
                .store
                .transactions()
                .map(|r| project(&self.registry, kind, r))
                .collect(),
            EntityKind::Search => self
                .store
                .searches()
                .map(|r| project(&self.registry, kind, r))
                .collect(),
        }
    }

    /// Apply a partial update addressed by id or slug.
    pub fn update(
        &mut self,
        kind: EntityKind,
        key: &ResourceKey,
        payload: &Value,
    ) -> Result<Value, TransferError> {
        let id = self.resolve(kind, key)?;
        let cleaned = self.screened(kind, payload, ScreenMode::Update)?;
        match kind {
            EntityKind::User => {
                let record = self.store.update_user(UserId::new(id), parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Profile => {
                let record = self
                    .store
                    .update_profile(ProfileId::new(id), parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Product => {
                let record = self
                    .store
                    .update_product(ProductId::new(id), parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Category => {
                let record = self
                    .store
                    .update_category(CategoryId::new(id), parse(cleaned)?)?;
                let products = self.store.category_products(record.id);
                project_category(&self.registry, &record, &products)
            }
            EntityKind::Image => {
                let record = self.store.update_image(ImageId::new(id), parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Rating => {
                let record = self
                    .store
                    .update_rating(RatingId::new(id), parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::CartItem => {
                let record = self
                    .store
                    .update_cart_item(CartItemId::new(id), parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Special => {
                let record = self
                    .store
                    .update_special(SpecialId::new(id), parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Coupon => {
                let record = self.store.update_coupon(CouponId::new(id), parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Purchase => {
                let record = self
                    .store
                    .update_purchase(PurchaseId::new(id), parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Transaction => {
                let record = self
                    .store
                    .update_transaction(TransactionId::new(id), parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
            EntityKind::Search => {
                let record = self.store.update_search(SearchId::new(id), parse(cleaned)?)?;
                project(&self.registry, kind, &record)
            }
        }
    }

    /// Delete a record, cascading to its dependents.
    pub fn delete(&mut self, kind: EntityKind, key: &ResourceKey) -> Result<(), TransferError> {
        let id = self.resolve(kind, key)?;
        match kind {
            EntityKind::User => self.store.delete_user(UserId::new(id))?,
            EntityKind::Profile => self.store.delete_profile(ProfileId::new(id))?,
            EntityKind::Product => self.store.delete_product(ProductId::new(id))?,
            EntityKind::Category => self.store.delete_category(CategoryId::new(id))?,
            EntityKind::Image => self.store.delete_image(ImageId::new(id))?,
            EntityKind::Rating => self.store.delete_rating(RatingId::new(id))?,
            EntityKind::CartItem => self.store.delete_cart_item(CartItemId::new(id))?,
            EntityKind::Special => self.store.delete_special(SpecialId::new(id))?,
            EntityKind::Coupon => self.store.delete_coupon(CouponId::new(id))?,
            EntityKind::Purchase => self.store.delete_purchase(PurchaseId::new(id))?,
            EntityKind::Transaction => self.store.delete_transaction(TransactionId::new(id))?,
            EntityKind::Search => self.store.delete_search(SearchId::new(id))?,
        }
        Ok(())
    }

    /// Resolve a collection path segment, e.g. `"products"`, to the kind
    /// it serves. Callers addressing the surface by resource path go
    /// through here; unknown paths report as not found.
    pub fn collection_kind(&self, collection: &str) -> Result<EntityKind, TransferError> {
        EntityKind::from_collection(collection)
            .ok_or_else(|| TransferError::UnknownCollection(collection.to_string()))
    }

    /// Resolve a key to a numeric id. Slug addressing exists only for
    /// products and categories; other kinds report the record as missing.
    fn resolve(&self, kind: EntityKind, key: &ResourceKey) -> Result<i64, TransferError> {
        match key {
            ResourceKey::Id(id) => Ok(*id),
            ResourceKey::Slug(slug) => match kind {
                EntityKind::Product => Ok(self.store.product_by_slug(slug)?.id.get()),
                EntityKind::Category => Ok(self.store.category_by_slug(slug)?.id.get()),
                _ => Err(StoreError::not_found(kind, slug).into()),
            },
        }
    }

    fn screened(
        &self,
        kind: EntityKind,
        payload: &Value,
        mode: ScreenMode,
    ) -> Result<Value, TransferError> {
        match screen(kind, payload, mode) {
            Ok(cleaned) => Ok(cleaned),
            Err(err) => {
                tracing::debug!("rejected {} payload: {}", kind, err);
                Err(err.into())
            }
        }
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

fn parse<T: DeserializeOwned>(cleaned: Value) -> Result<T, TransferError> {
    Ok(serde_json::from_value(cleaned)?)
}
