//! Product, category, image and rating operations.

use crate::error::StoreError;
use crate::store::{missing_ref, Store};
use chrono::Utc;
use shopkit_model::prelude::*;
use shopkit_model::slug;
use std::collections::BTreeSet;

impl Store {
    // ---- products ----

    /// Create a product.
    ///
    /// An explicit slug must be free. A missing one is derived from the
    /// title, uniquified with a numeric suffix on collision; an empty
    /// title then stores no slug at all.
    pub fn create_product(&mut self, draft: ProductDraft) -> Result<Product, StoreError> {
        draft.validate()?;
        let slug = self.resolve_new_product_slug(&draft)?;
        let product = self
            .products
            .insert_with(|id| Product::from_draft(ProductId::new(id), draft, slug));
        tracing::debug!("created product {} (slug {:?})", product.id, product.slug);
        Ok(product)
    }

    /// Fetch a product by id.
    pub fn product(&self, id: ProductId) -> Result<&Product, StoreError> {
        self.products
            .get(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, id))
    }

    /// Fetch a product by slug.
    pub fn product_by_slug(&self, slug: &str) -> Result<&Product, StoreError> {
        self.products
            .values()
            .find(|p| p.slug.as_deref() == Some(slug))
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, slug))
    }

    /// All products in id order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Apply a partial update. Changing the slug into a taken one is a
    /// conflict; changing the title never touches an existing slug.
    pub fn update_product(
        &mut self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, StoreError> {
        if !self.products.contains(id.get()) {
            return Err(StoreError::not_found(EntityKind::Product, id));
        }
        patch.validate()?;
        if let Some(Some(new_slug)) = &patch.slug {
            if self.product_slug_taken(new_slug, Some(id)) {
                return Err(StoreError::conflict(
                    EntityKind::Product,
                    "slug",
                    new_slug.clone(),
                ));
            }
        }
        let product = self
            .products
            .get_mut(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, id))?;
        product.apply(patch);
        tracing::debug!("updated product {}", id);
        Ok(product.clone())
    }

    /// Delete a product and everything that references it: images,
    /// ratings, cart lines, specials, category links, and the
    /// transactions of any of those.
    pub fn delete_product(&mut self, id: ProductId) -> Result<(), StoreError> {
        if self.products.remove(id.get()).is_none() {
            return Err(StoreError::not_found(EntityKind::Product, id));
        }
        let images = self.images.extract_where(|i| i.product == id);
        let ratings = self.ratings.extract_where(|r| r.product == id);
        let cart_items = self.cart_items.extract_where(|c| c.product == id);
        let specials = self.specials.extract_where(|s| s.product == id);

        let cart_ids: BTreeSet<CartItemId> = cart_items.iter().map(|c| c.id).collect();
        let special_ids: BTreeSet<SpecialId> = specials.iter().map(|s| s.id).collect();
        let transactions = self.transactions.extract_where(|t| {
            t.product == id
                || cart_ids.contains(&t.shoppingcart)
                || special_ids.contains(&t.special)
        });
        self.links.retain(|(_, p)| *p != id);

        tracing::debug!(
            "deleted product {} ({} images, {} ratings, {} cart lines, {} specials, {} transactions)",
            id,
            images.len(),
            ratings.len(),
            cart_items.len(),
            specials.len(),
            transactions.len()
        );
        Ok(())
    }

    fn resolve_new_product_slug(
        &self,
        draft: &ProductDraft,
    ) -> Result<Option<String>, StoreError> {
        match &draft.slug {
            Some(explicit) => {
                if self.product_slug_taken(explicit, None) {
                    return Err(ValidationError::single("slug", "already in use").into());
                }
                Ok(Some(explicit.clone()))
            }
            None => {
                let derived = slug::uniquify(&draft.title, |c| self.product_slug_taken(c, None));
                Ok(if derived.is_empty() { None } else { Some(derived) })
            }
        }
    }

    fn product_slug_taken(&self, candidate: &str, excluding: Option<ProductId>) -> bool {
        self.products
            .values()
            .any(|p| Some(p.id) != excluding && p.slug.as_deref() == Some(candidate))
    }

    // ---- categories ----

    /// Create a category and link any listed products.
    pub fn create_category(&mut self, draft: CategoryDraft) -> Result<Category, StoreError> {
        let mut errors = draft.validate().err().unwrap_or_default();
        for pid in &draft.products {
            if !self.products.contains(pid.get()) {
                missing_ref(&mut errors, "products", pid);
            }
        }
        errors.into_result()?;
        let slug = self.resolve_new_category_slug(&draft)?;
        let now = Utc::now();
        let linked = draft.products.clone();
        let category = self
            .categories
            .insert_with(|id| Category::from_draft(CategoryId::new(id), draft, slug, now));
        self.replace_links(category.id, &linked);
        tracing::debug!("created category {} ({})", category.id, category.slug);
        Ok(category)
    }

    /// Fetch a category by id.
    pub fn category(&self, id: CategoryId) -> Result<&Category, StoreError> {
        self.categories
            .get(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Category, id))
    }

    /// Fetch a category by slug.
    pub fn category_by_slug(&self, slug: &str) -> Result<&Category, StoreError> {
        self.categories
            .values()
            .find(|c| c.slug == slug)
            .ok_or_else(|| StoreError::not_found(EntityKind::Category, slug))
    }

    /// All categories in id order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Apply a partial update. A `products` list replaces the whole link
    /// set; every id must exist.
    pub fn update_category(
        &mut self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Category, StoreError> {
        if !self.categories.contains(id.get()) {
            return Err(StoreError::not_found(EntityKind::Category, id));
        }
        let mut errors = patch.validate().err().unwrap_or_default();
        if let Some(products) = &patch.products {
            for pid in products {
                if !self.products.contains(pid.get()) {
                    missing_ref(&mut errors, "products", pid);
                }
            }
        }
        errors.into_result()?;
        if let Some(new_slug) = &patch.slug {
            if self.category_slug_taken(new_slug, Some(id)) {
                return Err(StoreError::conflict(
                    EntityKind::Category,
                    "slug",
                    new_slug.clone(),
                ));
            }
        }
        let linked = patch.products.clone();
        let now = Utc::now();
        let category = self
            .categories
            .get_mut(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Category, id))?;
        category.apply(patch);
        category.updated_at = now;
        let snapshot = category.clone();
        if let Some(products) = linked {
            self.replace_links(id, &products);
        }
        tracing::debug!("updated category {}", id);
        Ok(snapshot)
    }

    /// Delete a category. Its links go with it; the products stay.
    pub fn delete_category(&mut self, id: CategoryId) -> Result<(), StoreError> {
        if self.categories.remove(id.get()).is_none() {
            return Err(StoreError::not_found(EntityKind::Category, id));
        }
        self.links.retain(|(c, _)| *c != id);
        tracing::debug!("deleted category {}", id);
        Ok(())
    }

    fn resolve_new_category_slug(&self, draft: &CategoryDraft) -> Result<String, StoreError> {
        match &draft.slug {
            Some(explicit) => {
                if self.category_slug_taken(explicit, None) {
                    return Err(ValidationError::single("slug", "already in use").into());
                }
                Ok(explicit.clone())
            }
            None => {
                let derived = slug::uniquify(&draft.name, |c| self.category_slug_taken(c, None));
                if derived.is_empty() {
                    return Err(ValidationError::single(
                        "slug",
                        "could not derive a slug from the name",
                    )
                    .into());
                }
                Ok(derived)
            }
        }
    }

    fn category_slug_taken(&self, candidate: &str, excluding: Option<CategoryId>) -> bool {
        self.categories
            .values()
            .any(|c| Some(c.id) != excluding && c.slug == candidate)
    }

    // ---- images ----

    /// Create an image. The product must exist.
    pub fn create_image(&mut self, draft: ImageDraft) -> Result<Image, StoreError> {
        let mut errors = draft.validate().err().unwrap_or_default();
        if !self.products.contains(draft.product.get()) {
            missing_ref(&mut errors, "product", draft.product);
        }
        errors.into_result()?;
        let image = self
            .images
            .insert_with(|id| Image::from_draft(ImageId::new(id), draft));
        tracing::debug!("created image {} for product {}", image.id, image.product);
        Ok(image)
    }

    /// Fetch an image by id.
    pub fn image(&self, id: ImageId) -> Result<&Image, StoreError> {
        self.images
            .get(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Image, id))
    }

    /// All images in id order.
    pub fn images(&self) -> impl Iterator<Item = &Image> {
        self.images.values()
    }

    /// Apply a partial update.
    pub fn update_image(&mut self, id: ImageId, patch: ImagePatch) -> Result<Image, StoreError> {
        if !self.images.contains(id.get()) {
            return Err(StoreError::not_found(EntityKind::Image, id));
        }
        let mut errors = patch.validate().err().unwrap_or_default();
        if let Some(product) = patch.product {
            if !self.products.contains(product.get()) {
                missing_ref(&mut errors, "product", product);
            }
        }
        errors.into_result()?;
        let image = self
            .images
            .get_mut(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Image, id))?;
        image.apply(patch);
        tracing::debug!("updated image {}", id);
        Ok(image.clone())
    }

    /// Delete an image.
    pub fn delete_image(&mut self, id: ImageId) -> Result<(), StoreError> {
        if self.images.remove(id.get()).is_none() {
            return Err(StoreError::not_found(EntityKind::Image, id));
        }
        tracing::debug!("deleted image {}", id);
        Ok(())
    }

    // ---- ratings ----

    /// Create a rating. Both the product and the user must exist; the
    /// same user may rate the same product repeatedly.
    pub fn create_rating(&mut self, draft: RatingDraft) -> Result<Rating, StoreError> {
        let mut errors = draft.validate().err().unwrap_or_default();
        if !self.products.contains(draft.product.get()) {
            missing_ref(&mut errors, "product", draft.product);
        }
        if !self.users.contains(draft.user.get()) {
            missing_ref(&mut errors, "user", draft.user);
        }
        errors.into_result()?;
        let rating = self
            .ratings
            .insert_with(|id| Rating::from_draft(RatingId::new(id), draft));
        tracing::debug!("created rating {} on product {}", rating.id, rating.product);
        Ok(rating)
    }

    /// Fetch a rating by id.
    pub fn rating(&self, id: RatingId) -> Result<&Rating, StoreError> {
        self.ratings
            .get(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Rating, id))
    }

    /// All ratings in id order.
    pub fn ratings(&self) -> impl Iterator<Item = &Rating> {
        self.ratings.values()
    }

    /// Apply a partial update.
    pub fn update_rating(
        &mut self,
        id: RatingId,
        patch: RatingPatch,
    ) -> Result<Rating, StoreError> {
        if !self.ratings.contains(id.get()) {
            return Err(StoreError::not_found(EntityKind::Rating, id));
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
        let rating = self
            .ratings
            .get_mut(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Rating, id))?;
        rating.apply(patch);
        tracing::debug!("updated rating {}", id);
        Ok(rating.clone())
    }

    /// Delete a rating.
    pub fn delete_rating(&mut self, id: RatingId) -> Result<(), StoreError> {
        if self.ratings.remove(id.get()).is_none() {
            return Err(StoreError::not_found(EntityKind::Rating, id));
        }
        tracing::debug!("deleted rating {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> ProductDraft {
        ProductDraft {
            title: title.into(),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn test_slug_derived_from_title() {
        let mut store = Store::new();
        let product = store.create_product(titled("Wireless Mouse")).unwrap();
        assert_eq!(product.slug.as_deref(), Some("wireless-mouse"));
        assert_eq!(
            store.product_by_slug("wireless-mouse").unwrap().id,
            product.id
        );
    }

    #[test]
    fn test_derived_slug_collisions_get_suffixes() {
        let mut store = Store::new();
        let first = store.create_product(titled("Trail Shoes")).unwrap();
        let second = store.create_product(titled("Trail Shoes")).unwrap();
        let third = store.create_product(titled("Trail Shoes")).unwrap();
        assert_eq!(first.slug.as_deref(), Some("trail-shoes"));
        assert_eq!(second.slug.as_deref(), Some("trail-shoes-2"));
        assert_eq!(third.slug.as_deref(), Some("trail-shoes-3"));
    }

    #[test]
    fn test_explicit_duplicate_slug_rejected() {
        let mut store = Store::new();
        store
            .create_product(ProductDraft {
                slug: Some("mouse".into()),
                ..titled("A")
            })
            .unwrap();
        let err = store
            .create_product(ProductDraft {
                slug: Some("mouse".into()),
                ..titled("B")
            })
            .unwrap_err();
        match err {
            StoreError::Validation(v) => assert!(v.mentions("slug")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_untitled_product_has_no_slug() {
        let mut store = Store::new();
        let bare = store.create_product(ProductDraft::default()).unwrap();
        assert_eq!(bare.title, "");
        assert_eq!(bare.slug, None);

        // Null slugs never collide with each other.
        let second = store.create_product(ProductDraft::default()).unwrap();
        assert_eq!(second.slug, None);
    }

    #[test]
    fn test_retitling_keeps_the_slug() {
        let mut store = Store::new();
        let product = store.create_product(titled("Wireless Mouse")).unwrap();
        let updated = store
            .update_product(
                product.id,
                ProductPatch {
                    title: Some("Cordless Mouse".into()),
                    ..ProductPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Cordless Mouse");
        assert_eq!(updated.slug.as_deref(), Some("wireless-mouse"));
    }

    #[test]
    fn test_update_slug_into_taken_one_conflicts() {
        let mut store = Store::new();
        store.create_product(titled("Mouse")).unwrap();
        let other = store.create_product(titled("Keyboard")).unwrap();

        let err = store
            .update_product(
                other.id,
                ProductPatch {
                    slug: Some(Some("mouse".into())),
                    ..ProductPatch::default()
                },
            )
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_clearing_a_slug_frees_it() {
        let mut store = Store::new();
        let product = store.create_product(titled("Mouse")).unwrap();
        store
            .update_product(
                product.id,
                ProductPatch {
                    slug: Some(None),
                    ..ProductPatch::default()
                },
            )
            .unwrap();
        assert!(store.product_by_slug("mouse").unwrap_err().is_not_found());

        // The freed handle is usable again.
        let next = store.create_product(titled("Mouse")).unwrap();
        assert_eq!(next.slug.as_deref(), Some("mouse"));
    }

    #[test]
    fn test_category_slug_derived_from_name() {
        let mut store = Store::new();
        let category = store
            .create_category(CategoryDraft {
                name: "Home Office".into(),
                ..CategoryDraft::default()
            })
            .unwrap();
        assert_eq!(category.slug, "home-office");
        assert_eq!(
            store.category_by_slug("home-office").unwrap().id,
            category.id
        );
    }

    #[test]
    fn test_category_links_replace_and_dedupe() {
        let mut store = Store::new();
        let mouse = store.create_product(titled("Mouse")).unwrap();
        let desk = store.create_product(titled("Desk")).unwrap();

        let category = store
            .create_category(CategoryDraft {
                name: "Office".into(),
                products: vec![mouse.id, mouse.id, desk.id],
                ..CategoryDraft::default()
            })
            .unwrap();
        assert_eq!(store.category_products(category.id), vec![mouse.id, desk.id]);

        store
            .update_category(
                category.id,
                CategoryPatch {
                    products: Some(vec![desk.id]),
                    ..CategoryPatch::default()
                },
            )
            .unwrap();
        assert_eq!(store.category_products(category.id), vec![desk.id]);
    }

    #[test]
    fn test_category_rejects_unknown_products() {
        let mut store = Store::new();
        let err = store
            .create_category(CategoryDraft {
                name: "Office".into(),
                products: vec![ProductId::new(404)],
                ..CategoryDraft::default()
            })
            .unwrap_err();
        match err {
            StoreError::Validation(v) => assert!(v.mentions("products")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_category_keeps_products() {
        let mut store = Store::new();
        let mouse = store.create_product(titled("Mouse")).unwrap();
        let category = store
            .create_category(CategoryDraft {
                name: "Office".into(),
                products: vec![mouse.id],
                ..CategoryDraft::default()
            })
            .unwrap();

        store.delete_category(category.id).unwrap();
        assert!(store.product(mouse.id).is_ok());
        assert!(store.links.is_empty());
    }

    #[test]
    fn test_image_requires_existing_product() {
        let mut store = Store::new();
        let err = store
            .create_image(ImageDraft {
                product: ProductId::new(7),
                ..ImageDraft::default()
            })
            .unwrap_err();
        match err {
            StoreError::Validation(v) => assert!(v.mentions("product")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_repeat_ratings_allowed() {
        let mut store = Store::new();
        let mouse = store.create_product(titled("Mouse")).unwrap();
        let ada = store
            .create_user(UserDraft {
                username: "ada".into(),
                ..UserDraft::default()
            })
            .unwrap();

        for stars in [3, 5] {
            store
                .create_rating(RatingDraft {
                    product: mouse.id,
                    user: ada.id,
                    rating: stars,
                    comment: String::new(),
                })
                .unwrap();
        }
        assert_eq!(store.ratings().count(), 2);
    }

    #[test]
    fn test_delete_product_cascades() {
        let mut store = Store::new();
        let mouse = store.create_product(titled("Mouse")).unwrap();
        let keep = store.create_product(titled("Keyboard")).unwrap();
        let ada = store
            .create_user(UserDraft {
                username: "ada".into(),
                ..UserDraft::default()
            })
            .unwrap();

        store
            .create_image(ImageDraft {
                product: mouse.id,
                ..ImageDraft::default()
            })
            .unwrap();
        store
            .create_rating(RatingDraft {
                product: mouse.id,
                user: ada.id,
                rating: 5,
                comment: String::new(),
            })
            .unwrap();
        store
            .create_image(ImageDraft {
                product: keep.id,
                ..ImageDraft::default()
            })
            .unwrap();

        store.delete_product(mouse.id).unwrap();

        assert!(store.product(mouse.id).unwrap_err().is_not_found());
        assert_eq!(store.ratings().count(), 0);
        let remaining: Vec<_> = store.images().collect();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].product, keep.id);
    }
}
