//! Database constraint violations organized by functional area.
//!
//! Postgres reports violated constraints by name. These enumerations parse
//! those names into typed values so callers can react to a specific
//! violation (say, the one-role-per-project rule) instead of string
//! matching on error messages.

mod accounts;
mod profiles;
mod team_members;
mod work_breakdown;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::accounts::AccountConstraints;
pub use self::profiles::ProfileConstraints;
pub use self::team_members::TeamMemberConstraints;
pub use self::work_breakdown::{ProjectConstraints, StageConstraints, TaskConstraints};

/// Unified constraint violation enum that can represent any database constraint.
///
/// This enum wraps all specific constraint types, providing a single
/// interface for handling any constraint violation while keeping the
/// per-table types available for precise matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    /// Accounts table constraints.
    Account(AccountConstraints),
    /// Profiles table constraints.
    Profile(ProfileConstraints),
    /// Team members table constraints.
    TeamMember(TeamMemberConstraints),
    /// Projects table constraints.
    Project(ProjectConstraints),
    /// Stages table constraints.
    Stage(StageConstraints),
    /// Tasks table constraints.
    Task(TaskConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (date relationships).
    Chronological,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
    /// Reference constraints (foreign keys pointing at missing rows).
    Reference,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// Returns `None` if the constraint name is not recognized.
    pub fn new(constraint: &str) -> Option<Self> {
        if let Some(c) = AccountConstraints::new(constraint) {
            return Some(Self::Account(c));
        }
        if let Some(c) = ProfileConstraints::new(constraint) {
            return Some(Self::Profile(c));
        }
        if let Some(c) = TeamMemberConstraints::new(constraint) {
            return Some(Self::TeamMember(c));
        }
        if let Some(c) = ProjectConstraints::new(constraint) {
            return Some(Self::Project(c));
        }
        if let Some(c) = StageConstraints::new(constraint) {
            return Some(Self::Stage(c));
        }
        if let Some(c) = TaskConstraints::new(constraint) {
            return Some(Self::Task(c));
        }

        None
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            Self::Account(c) => c.categorize(),
            Self::Profile(c) => c.categorize(),
            Self::TeamMember(c) => c.categorize(),
            Self::Project(c) => c.categorize(),
            Self::Stage(c) => c.categorize(),
            Self::Task(c) => c.categorize(),
        }
    }

    /// Returns whether this violation is a uniqueness conflict.
    #[inline]
    pub fn is_uniqueness(&self) -> bool {
        self.categorize() == ConstraintCategory::Uniqueness
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account(c) => c.fmt(f),
            Self::Profile(c) => c.fmt(f),
            Self::TeamMember(c) => c.fmt(f),
            Self::Project(c) => c.fmt(f),
            Self::Stage(c) => c.fmt(f),
            Self::Task(c) => c.fmt(f),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_membership_uniqueness() {
        let violation = ConstraintViolation::new("team_members_project_id_account_id_key")
            .expect("known constraint");
        assert_eq!(
            violation,
            ConstraintViolation::TeamMember(TeamMemberConstraints::ProjectAccountUnique)
        );
        assert!(violation.is_uniqueness());
    }

    #[test]
    fn parses_profile_one_to_one() {
        let violation = ConstraintViolation::new("profiles_account_id_key").expect("known");
        assert_eq!(
            violation,
            ConstraintViolation::Profile(ProfileConstraints::AccountUnique)
        );
    }

    #[test]
    fn categorizes_date_ranges_as_chronological() {
        for name in [
            "projects_ends_after_starts",
            "stages_ends_after_starts",
            "tasks_ends_after_starts",
        ] {
            let violation = ConstraintViolation::new(name).expect("known");
            assert_eq!(violation.categorize(), ConstraintCategory::Chronological);
            assert_eq!(violation.to_string(), name);
        }
    }

    #[test]
    fn parses_membership_foreign_keys() {
        for name in ["team_members_project_id_fkey", "team_members_account_id_fkey"] {
            let violation = ConstraintViolation::new(name).expect("known");
            assert_eq!(violation.categorize(), ConstraintCategory::Reference);
            assert!(!violation.is_uniqueness());
        }
    }

    #[test]
    fn unknown_constraint_is_none() {
        assert_eq!(ConstraintViolation::new("documents_pkey"), None);
    }
}
