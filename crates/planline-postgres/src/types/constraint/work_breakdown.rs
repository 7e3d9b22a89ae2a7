//! Projects, stages and tasks table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Projects table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum ProjectConstraints {
    /// End date precedes the start date.
    #[strum(serialize = "projects_ends_after_starts")]
    EndsAfterStarts,
}

/// Stages table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum StageConstraints {
    /// End date precedes the start date.
    #[strum(serialize = "stages_ends_after_starts")]
    EndsAfterStarts,
}

/// Tasks table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum TaskConstraints {
    /// End date precedes the start date.
    #[strum(serialize = "tasks_ends_after_starts")]
    EndsAfterStarts,
}

macro_rules! date_range_constraint {
    ($name:ident) => {
        impl $name {
            /// Creates a new value from the constraint name.
            pub fn new(constraint: &str) -> Option<Self> {
                constraint.parse().ok()
            }

            /// Returns the category of this constraint violation.
            pub fn categorize(&self) -> ConstraintCategory {
                match self {
                    $name::EndsAfterStarts => ConstraintCategory::Chronological,
                }
            }
        }

        impl From<$name> for String {
            #[inline]
            fn from(val: $name) -> Self {
                val.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = strum::ParseError;

            #[inline]
            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

date_range_constraint!(ProjectConstraints);
date_range_constraint!(StageConstraints);
date_range_constraint!(TaskConstraints);
