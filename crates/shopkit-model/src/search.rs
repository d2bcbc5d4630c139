//! Search query log.

use crate::entity::EntityKind;
use crate::error::ValidationError;
use crate::ids::{SearchId, UserId};
use crate::schema::EntitySchema;
use serde::{Deserialize, Serialize};

/// One logged search a user ran.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchEntry {
    /// Unique entry identifier.
    pub id: SearchId,
    /// Who searched.
    pub user: UserId,
    /// What they typed.
    pub search_term: String,
}

impl SearchEntry {
    /// Materialize a validated draft into a stored record.
    pub fn from_draft(id: SearchId, draft: SearchDraft) -> Self {
        Self {
            id,
            user: draft.user,
            search_term: draft.search_term,
        }
    }

    /// Overwrite the fields a patch carries.
    pub fn apply(&mut self, patch: SearchPatch) {
        if let Some(v) = patch.user {
            self.user = v;
        }
        if let Some(v) = patch.search_term {
            self.search_term = v;
        }
    }
}

/// Inbound fields for creating a [`SearchEntry`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchDraft {
    pub user: UserId,
    pub search_term: String,
}

impl Default for SearchDraft {
    fn default() -> Self {
        Self {
            user: UserId::new(0),
            search_term: String::new(),
        }
    }
}

impl SearchDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Search);
        let mut errors = ValidationError::new();
        schema.check_str(&mut errors, "search_term", &self.search_term);
        errors.into_result()
    }
}

/// Partial update for a [`SearchEntry`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchPatch {
    pub user: Option<UserId>,
    pub search_term: Option<String>,
}

impl SearchPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Search);
        let mut errors = ValidationError::new();
        if let Some(v) = &self.search_term {
            schema.check_str(&mut errors, "search_term", v);
        }
        errors.into_result()
    }
}
