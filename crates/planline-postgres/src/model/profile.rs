//! Profile model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::profiles;

/// Profile attached one-to-one to an account.
///
/// Provisioned exactly once, inside the same transaction that creates the
/// account. The unique index on `account_id` rejects any second profile.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Profile {
    /// Unique profile identifier
    pub id: Uuid,
    /// Owning account
    pub account_id: Uuid,
    /// Phone number, empty until the user fills it in
    pub phone: String,
    /// Soft-active flag
    pub is_active: bool,
    /// Timestamp when the profile was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the profile was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new profile.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewProfile {
    /// Owning account
    pub account_id: Uuid,
    /// Initial phone number
    pub phone: Option<String>,
}

/// Data for updating a profile.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateProfile {
    /// Phone number
    pub phone: Option<String>,
    /// Soft-active flag
    pub is_active: Option<bool>,
}

impl UpdateProfile {
    /// Returns whether any field of the changeset is set.
    pub fn has_changes(&self) -> bool {
        self.phone.is_some() || self.is_active.is_some()
    }
}
