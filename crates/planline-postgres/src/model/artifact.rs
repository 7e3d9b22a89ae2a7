//! Artifact model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::model::{Project, Stage, Task};
use crate::schema::artifacts;
use crate::types::ArtifactKind;

/// Artifact model, a file attached to exactly one project, stage or task.
///
/// The attachment is a tagged polymorphic reference: [`ArtifactKind`] names
/// the target table and `target_id` the row. There is no foreign key behind
/// it, so attachment cleanup rides the owning delete transactions.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = artifacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Artifact {
    /// Unique artifact identifier
    pub id: Uuid,
    /// Artifact title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Storage path or key of the file payload
    pub file_path: String,
    /// Kind of record the artifact is attached to
    pub target_kind: ArtifactKind,
    /// Identifier of the attachment target
    pub target_id: Uuid,
    /// Soft-active flag
    pub is_active: bool,
    /// Timestamp when the artifact was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the artifact was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new artifact.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = artifacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewArtifact {
    /// Artifact title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Storage path or key of the file payload
    pub file_path: String,
    /// Kind of record the artifact is attached to
    pub target_kind: ArtifactKind,
    /// Identifier of the attachment target
    pub target_id: Uuid,
}

/// Data for updating an artifact.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = artifacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateArtifact {
    /// Artifact title
    pub title: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Storage path or key
    pub file_path: Option<String>,
    /// Soft-active flag
    pub is_active: Option<bool>,
}

impl UpdateArtifact {
    /// Returns whether any field of the changeset is set.
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.file_path.is_some()
            || self.is_active.is_some()
    }
}

/// A resolved attachment target: the record an artifact points at.
#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentTarget {
    /// The artifact is attached to a project.
    Project(Project),
    /// The artifact is attached to a stage.
    Stage(Stage),
    /// The artifact is attached to a task.
    Task(Task),
}

impl AttachmentTarget {
    /// Returns the kind discriminator of this target.
    pub fn kind(&self) -> ArtifactKind {
        match self {
            AttachmentTarget::Project(_) => ArtifactKind::Project,
            AttachmentTarget::Stage(_) => ArtifactKind::Stage,
            AttachmentTarget::Task(_) => ArtifactKind::Task,
        }
    }

    /// Returns the identifier of the target row.
    pub fn id(&self) -> Uuid {
        match self {
            AttachmentTarget::Project(p) => p.id,
            AttachmentTarget::Stage(s) => s.id,
            AttachmentTarget::Task(t) => t.id,
        }
    }
}
