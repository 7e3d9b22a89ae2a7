//! Project stage model for PostgreSQL database operations.

use diesel::prelude::*;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::schema::stages;
use crate::types::WorkStatus;

/// Stage model, a named phase of a project with its own date range.
///
/// Deleted together with its project. The optional responsible reference
/// points at a team membership of the same project and is cleared, not
/// cascaded, when that membership is removed.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = stages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Stage {
    /// Unique stage identifier
    pub id: Uuid,
    /// Owning project
    pub project_id: Uuid,
    /// Stage name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Planned start date
    pub starts_on: Date,
    /// Planned end date
    pub ends_on: Date,
    /// Team member responsible for the stage, if any
    pub responsible_id: Option<Uuid>,
    /// Current execution status
    pub status: WorkStatus,
    /// Soft-active flag
    pub is_active: bool,
    /// Timestamp when the stage was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the stage was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new stage.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewStage {
    /// Owning project
    pub project_id: Uuid,
    /// Stage name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Planned start date
    pub starts_on: Date,
    /// Planned end date
    pub ends_on: Date,
    /// Optional responsible team member
    pub responsible_id: Option<Uuid>,
    /// Initial status, defaults to not-started
    pub status: Option<WorkStatus>,
}

/// Data for updating a stage.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = stages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateStage {
    /// Stage name
    pub name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Planned start date
    pub starts_on: Option<Date>,
    /// Planned end date
    pub ends_on: Option<Date>,
    /// Responsible team member; `Some(None)` clears the reference
    pub responsible_id: Option<Option<Uuid>>,
    /// Execution status
    pub status: Option<WorkStatus>,
    /// Soft-active flag
    pub is_active: Option<bool>,
}

impl UpdateStage {
    /// Returns whether any field of the changeset is set.
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.starts_on.is_some()
            || self.ends_on.is_some()
            || self.responsible_id.is_some()
            || self.status.is_some()
            || self.is_active.is_some()
    }
}
