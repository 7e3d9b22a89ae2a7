//! Team member model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::team_members;

/// Team member model linking an account to a project under a role.
///
/// The `(project_id, account_id)` pair is unique: an account holds exactly
/// one role per project. Memberships are the only valid source of stage
/// "responsible" and task "assignee" values.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = team_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamMember {
    /// Unique membership identifier
    pub id: Uuid,
    /// Project the membership belongs to
    pub project_id: Uuid,
    /// Member's account
    pub account_id: Uuid,
    /// Free-text role label within the project
    pub member_role: String,
    /// Soft-active flag
    pub is_active: bool,
    /// Timestamp when the membership was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the membership was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new team member.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = team_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewTeamMember {
    /// Project ID
    pub project_id: Uuid,
    /// Account ID
    pub account_id: Uuid,
    /// Role label
    pub member_role: String,
}

/// Data for updating a team member.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = team_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateTeamMember {
    /// Role label
    pub member_role: Option<String>,
    /// Soft-active flag
    pub is_active: Option<bool>,
}

impl UpdateTeamMember {
    /// Returns whether any field of the changeset is set.
    pub fn has_changes(&self) -> bool {
        self.member_role.is_some() || self.is_active.is_some()
    }
}

impl TeamMember {
    /// Returns whether this membership belongs to the given project.
    ///
    /// The check behind assignment scoping: responsibles and assignees
    /// must come from the owning project's team.
    #[inline]
    pub fn belongs_to(&self, project_id: Uuid) -> bool {
        self.project_id == project_id
    }
}
