//! Team members table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Team members table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum TeamMemberConstraints {
    /// An account already holds a role in this project. A user holds
    /// exactly one role per project.
    #[strum(serialize = "team_members_project_id_account_id_key")]
    ProjectAccountUnique,

    /// The referenced project does not exist.
    #[strum(serialize = "team_members_project_id_fkey")]
    ProjectReference,

    /// The referenced account does not exist.
    #[strum(serialize = "team_members_account_id_fkey")]
    AccountReference,
}

impl TeamMemberConstraints {
    /// Creates a new [`TeamMemberConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            TeamMemberConstraints::ProjectAccountUnique => ConstraintCategory::Uniqueness,
            TeamMemberConstraints::ProjectReference | TeamMemberConstraints::AccountReference => {
                ConstraintCategory::Reference
            }
        }
    }
}

impl From<TeamMemberConstraints> for String {
    #[inline]
    fn from(val: TeamMemberConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for TeamMemberConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
