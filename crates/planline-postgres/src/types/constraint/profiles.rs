//! Profiles table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Profiles table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum ProfileConstraints {
    /// Second profile for the same account. Guards the one-to-one
    /// relationship that makes profile provisioning idempotent.
    #[strum(serialize = "profiles_account_id_key")]
    AccountUnique,
}

impl ProfileConstraints {
    /// Creates a new [`ProfileConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ProfileConstraints::AccountUnique => ConstraintCategory::Uniqueness,
        }
    }
}

impl From<ProfileConstraints> for String {
    #[inline]
    fn from(val: ProfileConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ProfileConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
