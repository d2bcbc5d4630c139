//! User accounts and their profiles.

use crate::entity::EntityKind;
use crate::error::ValidationError;
use crate::ids::{ProfileId, UserId};
use crate::patch::double_option;
use crate::schema::EntitySchema;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Wire names of the profile status choices, in declaration order.
pub const PROFILE_STATUSES: &[&str] = &["active", "paused", "suspended", "pending_email_validation"];

/// Lifecycle state of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    /// Profile is live.
    #[default]
    Active,
    /// Temporarily deactivated by its owner.
    Paused,
    /// Deactivated by an operator.
    Suspended,
    /// Waiting on the owner to confirm their address.
    PendingEmailValidation,
}

impl ProfileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileStatus::Active => "active",
            ProfileStatus::Paused => "paused",
            ProfileStatus::Suspended => "suspended",
            ProfileStatus::PendingEmailValidation => "pending_email_validation",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(ProfileStatus::Active),
            "paused" => Some(ProfileStatus::Paused),
            "suspended" => Some(ProfileStatus::Suspended),
            "pending_email_validation" => Some(ProfileStatus::PendingEmailValidation),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProfileStatus::Active => "Active",
            ProfileStatus::Paused => "Paused",
            ProfileStatus::Suspended => "Suspended",
            ProfileStatus::PendingEmailValidation => "Pending email validation",
        }
    }
}

/// A registered account.
///
/// Credentials and session state live in the surrounding framework; this
/// record carries only the catalog-facing identity fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique account identifier.
    pub id: UserId,
    /// Login handle (unique).
    pub username: String,
    /// Contact address.
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Cleared instead of deleting the account.
    pub is_active: bool,
    /// When the account was created.
    pub date_joined: DateTime<Utc>,
    /// Last successful sign-in, if any.
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Materialize a validated draft into a stored record.
    pub fn from_draft(id: UserId, draft: UserDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username: draft.username,
            email: draft.email,
            first_name: draft.first_name,
            last_name: draft.last_name,
            is_active: draft.is_active,
            date_joined: now,
            last_login: draft.last_login,
        }
    }

    /// Overwrite the fields a patch carries.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(v) = patch.username {
            self.username = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.first_name {
            self.first_name = v;
        }
        if let Some(v) = patch.last_name {
            self.last_name = v;
        }
        if let Some(v) = patch.is_active {
            self.is_active = v;
        }
        if let Some(v) = patch.last_login {
            self.last_login = v;
        }
    }
}

/// Inbound fields for creating a [`User`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_active: true,
            last_login: None,
        }
    }
}

impl UserDraft {
    /// Check field constraints that need no store state.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::User);
        let mut errors = ValidationError::new();
        schema.check_str(&mut errors, "username", &self.username);
        schema.check_str(&mut errors, "email", &self.email);
        schema.check_str(&mut errors, "first_name", &self.first_name);
        schema.check_str(&mut errors, "last_name", &self.last_name);
        errors.into_result()
    }
}

/// Partial update for a [`User`]. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
    /// `Some(None)` clears the stored value.
    #[serde(deserialize_with = "double_option")]
    pub last_login: Option<Option<DateTime<Utc>>>,
}

impl UserPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::User);
        let mut errors = ValidationError::new();
        if let Some(v) = &self.username {
            schema.check_str(&mut errors, "username", v);
        }
        if let Some(v) = &self.email {
            schema.check_str(&mut errors, "email", v);
        }
        if let Some(v) = &self.first_name {
            schema.check_str(&mut errors, "first_name", v);
        }
        if let Some(v) = &self.last_name {
            schema.check_str(&mut errors, "last_name", v);
        }
        errors.into_result()
    }
}

/// The profile attached to an account (at most one per user).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Unique profile identifier.
    pub id: ProfileId,
    /// Owning account (exclusive).
    pub user: UserId,
    /// Avatar URL.
    pub picture: String,
    /// Free-form self description.
    pub bio: String,
    /// Postal address.
    pub address: String,
    pub birth_date: Option<NaiveDate>,
    pub phone_number: String,
    /// Lifecycle state.
    pub status: ProfileStatus,
    /// Set once when the record is created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Materialize a validated draft into a stored record.
    pub fn from_draft(id: ProfileId, draft: ProfileDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user: draft.user,
            picture: draft.picture,
            bio: draft.bio,
            address: draft.address,
            birth_date: draft.birth_date,
            phone_number: draft.phone_number,
            status: draft.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields a patch carries.
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(v) = patch.user {
            self.user = v;
        }
        if let Some(v) = patch.picture {
            self.picture = v;
        }
        if let Some(v) = patch.bio {
            self.bio = v;
        }
        if let Some(v) = patch.address {
            self.address = v;
        }
        if let Some(v) = patch.birth_date {
            self.birth_date = v;
        }
        if let Some(v) = patch.phone_number {
            self.phone_number = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
    }
}

/// Inbound fields for creating a [`Profile`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    pub user: UserId,
    pub picture: String,
    pub bio: String,
    pub address: String,
    pub birth_date: Option<NaiveDate>,
    pub phone_number: String,
    pub status: ProfileStatus,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self {
            user: UserId::new(0),
            picture: String::new(),
            bio: String::new(),
            address: String::new(),
            birth_date: None,
            phone_number: String::new(),
            status: ProfileStatus::default(),
        }
    }
}

impl ProfileDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Profile);
        let mut errors = ValidationError::new();
        schema.check_str(&mut errors, "picture", &self.picture);
        schema.check_str(&mut errors, "bio", &self.bio);
        schema.check_str(&mut errors, "address", &self.address);
        schema.check_str(&mut errors, "phone_number", &self.phone_number);
        errors.into_result()
    }
}

/// Partial update for a [`Profile`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfilePatch {
    pub user: Option<UserId>,
    pub picture: Option<String>,
    pub bio: Option<String>,
    pub address: Option<String>,
    /// `Some(None)` clears the stored value.
    #[serde(deserialize_with = "double_option")]
    pub birth_date: Option<Option<NaiveDate>>,
    pub phone_number: Option<String>,
    pub status: Option<ProfileStatus>,
}

impl ProfilePatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schema = EntitySchema::for_kind(EntityKind::Profile);
        let mut errors = ValidationError::new();
        if let Some(v) = &self.picture {
            schema.check_str(&mut errors, "picture", v);
        }
        if let Some(v) = &self.bio {
            schema.check_str(&mut errors, "bio", v);
        }
        if let Some(v) = &self.address {
            schema.check_str(&mut errors, "address", v);
        }
        if let Some(v) = &self.phone_number {
            schema.check_str(&mut errors, "phone_number", v);
        }
        errors.into_result()
    }
}
