//! Account model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::accounts;

/// Account model representing a person who can sign in and be assigned work.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Account {
    /// Unique account identifier
    pub id: Uuid,
    /// Unique login name
    pub username: String,
    /// Contact email address
    pub email: String,
    /// Whether the account may use the back office
    pub is_staff: bool,
    /// Soft-active flag; inactive accounts are kept for history
    pub is_active: bool,
    /// Timestamp when the account was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the account was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new account.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAccount {
    /// Login name, unique across all accounts
    pub username: String,
    /// Contact email address
    pub email: String,
    /// Back-office access flag
    pub is_staff: Option<bool>,
}

/// Data for updating an account.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateAccount {
    /// Contact email address
    pub email: Option<String>,
    /// Back-office access flag
    pub is_staff: Option<bool>,
    /// Soft-active flag
    pub is_active: Option<bool>,
}

impl UpdateAccount {
    /// Returns whether any field of the changeset is set.
    pub fn has_changes(&self) -> bool {
        self.email.is_some() || self.is_staff.is_some() || self.is_active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_changeset_carries_no_changes() {
        assert!(!UpdateAccount::default().has_changes());
        let changes = UpdateAccount {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(changes.has_changes());
    }
}
