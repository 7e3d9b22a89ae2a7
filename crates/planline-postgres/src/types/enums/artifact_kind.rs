//! Attachment target discriminator for polymorphic artifacts.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Kind of record an artifact is attached to.
///
/// Corresponds to the `artifact_target` PostgreSQL enum. Together with the
/// target id this forms the tagged polymorphic reference of an artifact:
/// exactly one of project, stage or task. Resolution happens through an
/// explicit lookup per kind, never through reflection.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::ArtifactTarget"]
pub enum ArtifactKind {
    /// Attached to a project
    #[db_rename = "project"]
    #[serde(rename = "project")]
    #[strum(serialize = "project")]
    Project,

    /// Attached to a stage
    #[db_rename = "stage"]
    #[serde(rename = "stage")]
    #[strum(serialize = "stage")]
    Stage,

    /// Attached to a task
    #[db_rename = "task"]
    #[serde(rename = "task")]
    #[strum(serialize = "task")]
    Task,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_spelling() {
        assert_eq!("project".parse::<ArtifactKind>(), Ok(ArtifactKind::Project));
        assert_eq!("stage".parse::<ArtifactKind>(), Ok(ArtifactKind::Stage));
        assert_eq!("task".parse::<ArtifactKind>(), Ok(ArtifactKind::Task));
        assert!("document".parse::<ArtifactKind>().is_err());
    }
}
