//! Contact model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::contacts;

/// Contact model, a project stakeholder who is not a team member.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Contact {
    /// Unique contact identifier
    pub id: Uuid,
    /// Project the contact relates to
    pub project_id: Uuid,
    /// Full name of the person
    pub full_name: String,
    /// Role or position label
    pub contact_role: String,
    /// Optional email address
    pub email: Option<String>,
    /// Optional phone number
    pub phone: Option<String>,
    /// Soft-active flag
    pub is_active: bool,
    /// Timestamp when the contact was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the contact was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new contact.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewContact {
    /// Project ID
    pub project_id: Uuid,
    /// Full name
    pub full_name: String,
    /// Role or position label
    pub contact_role: String,
    /// Optional email address
    pub email: Option<String>,
    /// Optional phone number
    pub phone: Option<String>,
}

/// Data for updating a contact.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateContact {
    /// Full name
    pub full_name: Option<String>,
    /// Role or position label
    pub contact_role: Option<String>,
    /// Email address
    pub email: Option<Option<String>>,
    /// Phone number
    pub phone: Option<Option<String>>,
    /// Soft-active flag
    pub is_active: Option<bool>,
}

impl UpdateContact {
    /// Returns whether any field of the changeset is set.
    pub fn has_changes(&self) -> bool {
        self.full_name.is_some()
            || self.contact_role.is_some()
            || self.email.is_some()
            || self.phone.is_some()
            || self.is_active.is_some()
    }
}
