//! Task model for PostgreSQL database operations.

use diesel::prelude::*;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::schema::tasks;
use crate::types::WorkStatus;

/// Task model, the smallest unit of work, owned by a stage.
///
/// Deleted together with its stage. The optional assignee reference points
/// at a team membership of the stage's project and is cleared, not
/// cascaded, when that membership is removed.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Task {
    /// Unique task identifier
    pub id: Uuid,
    /// Owning stage
    pub stage_id: Uuid,
    /// Task name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Planned start date
    pub starts_on: Date,
    /// Planned end date
    pub ends_on: Date,
    /// Team member assigned to the task, if any
    pub assignee_id: Option<Uuid>,
    /// Current execution status
    pub status: WorkStatus,
    /// Soft-active flag
    pub is_active: bool,
    /// Timestamp when the task was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the task was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new task.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewTask {
    /// Owning stage
    pub stage_id: Uuid,
    /// Task name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Planned start date
    pub starts_on: Date,
    /// Planned end date
    pub ends_on: Date,
    /// Optional assignee team member
    pub assignee_id: Option<Uuid>,
    /// Initial status, defaults to not-started
    pub status: Option<WorkStatus>,
}

/// Data for updating a task.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateTask {
    /// Task name
    pub name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Planned start date
    pub starts_on: Option<Date>,
    /// Planned end date
    pub ends_on: Option<Date>,
    /// Assignee team member; `Some(None)` clears the reference
    pub assignee_id: Option<Option<Uuid>>,
    /// Execution status
    pub status: Option<WorkStatus>,
    /// Soft-active flag
    pub is_active: Option<bool>,
}

impl UpdateTask {
    /// Returns whether any field of the changeset is set.
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.starts_on.is_some()
            || self.ends_on.is_some()
            || self.assignee_id.is_some()
            || self.status.is_some()
            || self.is_active.is_some()
    }
}
