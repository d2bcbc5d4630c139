//! Search log operations.

use crate::error::StoreError;
use crate::store::{missing_ref, Store};
use shopkit_model::prelude::*;

impl Store {
    /// Log a search. The user must exist.
    pub fn create_search(&mut self, draft: SearchDraft) -> Result<SearchEntry, StoreError> {
        let mut errors = draft.validate().err().unwrap_or_default();
        if !self.users.contains(draft.user.get()) {
            missing_ref(&mut errors, "user", draft.user);
        }
        errors.into_result()?;
        let entry = self
            .searches
            .insert_with(|id| SearchEntry::from_draft(SearchId::new(id), draft));
        tracing::debug!("logged search {} for user {}", entry.id, entry.user);
        Ok(entry)
    }

    /// Fetch a search entry by id.
    pub fn search(&self, id: SearchId) -> Result<&SearchEntry, StoreError> {
        self.searches
            .get(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Search, id))
    }

    /// All logged searches in id order.
    pub fn searches(&self) -> impl Iterator<Item = &SearchEntry> {
        self.searches.values()
    }

    /// Apply a partial update to a search entry.
    pub fn update_search(
        &mut self,
        id: SearchId,
        patch: SearchPatch,
    ) -> Result<SearchEntry, StoreError> {
        if !self.searches.contains(id.get()) {
            return Err(StoreError::not_found(EntityKind::Search, id));
        }
        let mut errors = patch.validate().err().unwrap_or_default();
        if let Some(user) = patch.user {
            if !self.users.contains(user.get()) {
                missing_ref(&mut errors, "user", user);
            }
        }
        errors.into_result()?;
        let entry = self
            .searches
            .get_mut(id.get())
            .ok_or_else(|| StoreError::not_found(EntityKind::Search, id))?;
        entry.apply(patch);
        Ok(entry.clone())
    }

    /// Delete a search entry. Nothing references the log.
    pub fn delete_search(&mut self, id: SearchId) -> Result<(), StoreError> {
        if self.searches.remove(id.get()).is_none() {
            return Err(StoreError::not_found(EntityKind::Search, id));
        }
        tracing::debug!("deleted search {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_requires_existing_user() {
        let mut store = Store::new();
        let err = store
            .create_search(SearchDraft {
                user: UserId::new(9),
                search_term: "mouse".into(),
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(v) if v.mentions("user")));
    }

    #[test]
    fn test_search_lifecycle() {
        let mut store = Store::new();
        let user = store
            .create_user(UserDraft {
                username: "ada".into(),
                ..UserDraft::default()
            })
            .unwrap();
        let entry = store
            .create_search(SearchDraft {
                user: user.id,
                search_term: "mouse".into(),
            })
            .unwrap();

        let renamed = store
            .update_search(
                entry.id,
                SearchPatch {
                    search_term: Some("trackball".into()),
                    ..SearchPatch::default()
                },
            )
            .unwrap();
        assert_eq!(renamed.search_term, "trackball");

        store.delete_search(entry.id).unwrap();
        assert!(store.search(entry.id).unwrap_err().is_not_found());
    }
}
