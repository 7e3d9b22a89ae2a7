//! Main project model for PostgreSQL database operations.

use diesel::prelude::*;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::schema::projects;
use crate::types::WorkStatus;

/// Project model, the root of the work breakdown.
///
/// A project owns an ordered collection of stages, a team of members, a
/// set of stakeholder contacts, and any artifacts attached to it. Its
/// completion percentage is derived from its stages at read time and
/// never stored.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Project {
    /// Unique project identifier
    pub id: Uuid,
    /// Human-readable project name
    pub name: String,
    /// Optional description of the project goals
    pub description: Option<String>,
    /// Planned start date
    pub starts_on: Date,
    /// Planned end date
    pub ends_on: Date,
    /// Account managing the project, cleared if that account disappears
    pub manager_id: Option<Uuid>,
    /// Current execution status
    pub status: WorkStatus,
    /// Soft-active flag
    pub is_active: bool,
    /// Timestamp when the project was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the project was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new project.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewProject {
    /// Project name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Planned start date
    pub starts_on: Date,
    /// Planned end date
    pub ends_on: Date,
    /// Optional manager account
    pub manager_id: Option<Uuid>,
    /// Initial status, defaults to not-started
    pub status: Option<WorkStatus>,
}

/// Data for updating a project.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateProject {
    /// Project name
    pub name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Planned start date
    pub starts_on: Option<Date>,
    /// Planned end date
    pub ends_on: Option<Date>,
    /// Manager account
    pub manager_id: Option<Option<Uuid>>,
    /// Execution status
    pub status: Option<WorkStatus>,
    /// Soft-active flag
    pub is_active: Option<bool>,
}

impl UpdateProject {
    /// Returns whether any field of the changeset is set.
    ///
    /// Diesel rejects an all-empty changeset as a query error, so update
    /// paths treat a changeset without changes as a plain read.
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.starts_on.is_some()
            || self.ends_on.is_some()
            || self.manager_id.is_some()
            || self.status.is_some()
            || self.is_active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_changeset_carries_no_changes() {
        assert!(!UpdateProject::default().has_changes());
    }

    #[test]
    fn single_field_counts_as_a_change() {
        let changes = UpdateProject {
            name: Some("Rollout".into()),
            ..Default::default()
        };
        assert!(changes.has_changes());

        let changes = UpdateProject {
            manager_id: Some(None),
            ..Default::default()
        };
        assert!(changes.has_changes());
    }
}
