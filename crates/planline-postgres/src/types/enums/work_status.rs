//! Execution status enumeration shared by projects, stages and tasks.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Progress status of a project, stage or task.
///
/// This enumeration corresponds to the `work_status` PostgreSQL enum. Every
/// level of the work breakdown (project, stage, task) moves through the same
/// lifecycle, and only [`WorkStatus::Done`] children count towards the
/// derived completion percentage of their parent.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::WorkStatus"]
pub enum WorkStatus {
    /// Work has not started yet
    #[db_rename = "new"]
    #[serde(rename = "new")]
    #[strum(serialize = "new")]
    #[default]
    NotStarted,

    /// Work is underway
    #[db_rename = "progress"]
    #[serde(rename = "progress")]
    #[strum(serialize = "progress")]
    InProgress,

    /// Work is finished
    #[db_rename = "done"]
    #[serde(rename = "done")]
    #[strum(serialize = "done")]
    Done,

    /// Work was shelved and no longer counts as ongoing
    #[db_rename = "archived"]
    #[serde(rename = "archived")]
    #[strum(serialize = "archived")]
    Archived,
}

impl WorkStatus {
    /// Returns whether this status counts as completed for progress roll-ups.
    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, WorkStatus::Done)
    }

    /// Returns whether work is currently ongoing.
    #[inline]
    pub fn is_in_progress(self) -> bool {
        matches!(self, WorkStatus::InProgress)
    }

    /// Returns whether the record was archived.
    #[inline]
    pub fn is_archived(self) -> bool {
        matches!(self, WorkStatus::Archived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_values_match_database_spelling() {
        let json = serde_json::to_string(&WorkStatus::NotStarted).unwrap();
        assert_eq!(json, "\"new\"");
        let json = serde_json::to_string(&WorkStatus::InProgress).unwrap();
        assert_eq!(json, "\"progress\"");
        let json = serde_json::to_string(&WorkStatus::Done).unwrap();
        assert_eq!(json, "\"done\"");

        let status: WorkStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, WorkStatus::Archived);
    }

    #[test]
    fn default_is_not_started() {
        assert_eq!(WorkStatus::default(), WorkStatus::NotStarted);
        assert!(!WorkStatus::default().is_done());
    }

    #[test]
    fn only_done_counts_as_completed() {
        use strum::IntoEnumIterator;

        let done: Vec<_> = WorkStatus::iter().filter(|s| s.is_done()).collect();
        assert_eq!(done, vec![WorkStatus::Done]);
    }
}
