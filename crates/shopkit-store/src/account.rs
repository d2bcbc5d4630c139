//! User and profile operations.

use crate::error::StoreError;
use crate::store::{missing_ref, Store};
use chrono::Utc;
use shopkit_model::prelude::*;
use std::collections::BTreeSet;

impl Store {
    // ---- users ----

    /// Create a user. The username must be free.
    pub fn create_user(&mut self, draft: UserDraft) -> Result<User, StoreError> {
        let mut errors = draft.validate().err().unwrap_or_default();
        if self.username_taken(&draft.username, None) {
            errors.push("username", "already in use");
        }
        errors.into_result()?;
        let now = Utc::now();
        let user = self
            .users
            .insert_with(|id| User::from_draft(UserId::new(id), draft, now));
        tracing::debug!("created user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Fetch a user by id.
    pub fn user(&self, id: UserId) -> Result<&User, StoreError> {
        self.users
            .get(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::User, id))
    }

    /// All users in id order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Apply a partial update. Renaming into a taken username is a conflict.
    pub fn update_user(&mut self, id: UserId, patch: UserPatch) -> Result<User, StoreError> {
        if !self.users.contains(id.get()) {
            return Err(StoreError::not_found(EntityKind::User, id));
        }
        patch.validate()?;
        if let Some(name) = &patch.username {
            if self.username_taken(name, Some(id)) {
                return Err(StoreError::conflict(EntityKind::User, "username", name.clone()));
            }
        }
        let user = self
            .users
            .get_mut(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::User, id))?;
        user.apply(patch);
        tracing::debug!("updated user {}", id);
        Ok(user.clone())
    }

    /// Delete a user and everything that hangs off the account: the
    /// profile, ratings, cart lines (with their transactions) and logged
    /// searches.
    pub fn delete_user(&mut self, id: UserId) -> Result<(), StoreError> {
        if self.users.remove(id.get()).is_none() {
            return Err(StoreError::not_found(EntityKind::User, id));
        }
        let profiles = self.profiles.extract_where(|p| p.user == id);
        let ratings = self.ratings.extract_where(|r| r.user == id);
        let cart_items = self.cart_items.extract_where(|c| c.user == id);
        let searches = self.searches.extract_where(|s| s.user == id);

        let cart_ids: BTreeSet<CartItemId> = cart_items.iter().map(|c| c.id).collect();
        let transactions = self
            .transactions
            .extract_where(|t| cart_ids.contains(&t.shoppingcart));

        tracing::debug!(
            "deleted user {} ({} profiles, {} ratings, {} cart lines, {} searches, {} transactions)",
            id,
            profiles.len(),
            ratings.len(),
            cart_items.len(),
            searches.len(),
            transactions.len()
        );
        Ok(())
    }

    fn username_taken(&self, name: &str, excluding: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != excluding && u.username == name)
    }

    // ---- profiles ----

    /// Create a profile. The user must exist and not already have one.
    pub fn create_profile(&mut self, draft: ProfileDraft) -> Result<Profile, StoreError> {
        let mut errors = draft.validate().err().unwrap_or_default();
        if !self.users.contains(draft.user.get()) {
            missing_ref(&mut errors, "user", draft.user);
        } else if self.profile_exists_for(draft.user, None) {
            errors.push("user", "a profile for this user already exists");
        }
        errors.into_result()?;
        let now = Utc::now();
        let profile = self
            .profiles
            .insert_with(|id| Profile::from_draft(ProfileId::new(id), draft, now));
        tracing::debug!("created profile {} for user {}", profile.id, profile.user);
        Ok(profile)
    }

    /// Fetch a profile by id.
    pub fn profile(&self, id: ProfileId) -> Result<&Profile, StoreError> {
        self.profiles
            .get(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Profile, id))
    }

    /// All profiles in id order.
    pub fn profiles(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.values()
    }

    /// Apply a partial update. Reassigning to a user who already has a
    /// profile is a conflict.
    pub fn update_profile(
        &mut self,
        id: ProfileId,
        patch: ProfilePatch,
    ) -> Result<Profile, StoreError> {
        if !self.profiles.contains(id.get()) {
            return Err(StoreError::not_found(EntityKind::Profile, id));
        }
        let mut errors = patch.validate().err().unwrap_or_default();
        if let Some(user) = patch.user {
            if !self.users.contains(user.get()) {
                missing_ref(&mut errors, "user", user);
            }
        }
        errors.into_result()?;
        if let Some(user) = patch.user {
            if self.profile_exists_for(user, Some(id)) {
                return Err(StoreError::conflict(
                    EntityKind::Profile,
                    "user",
                    user.to_string(),
                ));
            }
        }
        let now = Utc::now();
        let profile = self
            .profiles
            .get_mut(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Profile, id))?;
        profile.apply(patch);
        profile.updated_at = now;
        tracing::debug!("updated profile {}", id);
        Ok(profile.clone())
    }

    /// Delete a profile. Nothing references profiles, so nothing cascades.
    pub fn delete_profile(&mut self, id: ProfileId) -> Result<(), StoreError> {
        if self.profiles.remove(id.get()).is_none() {
            return Err(StoreError::not_found(EntityKind::Profile, id));
        }
        tracing::debug!("deleted profile {}", id);
        Ok(())
    }

    fn profile_exists_for(&self, user: UserId, excluding: Option<ProfileId>) -> bool {
        self.profiles
            .values()
            .any(|p| Some(p.id) != excluding && p.user == user)
    }
}
