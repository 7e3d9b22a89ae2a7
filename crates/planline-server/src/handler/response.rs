//! Response payload types for the JSON API.

use planline_postgres::model;
use planline_postgres::query::{ProjectOverview, StageOverview};
use planline_postgres::types::WorkStatus;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Short account representation embedded in other responses.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    /// ID of the account.
    pub account_id: Uuid,
    /// Unique sign-in name.
    pub username: String,
    /// Contact email address.
    pub email: String,
}

impl AccountSummary {
    /// Creates a new instance of [`AccountSummary`].
    pub fn from_model(account: model::Account) -> Self {
        Self {
            account_id: account.id,
            username: account.username,
            email: account.email,
        }
    }
}

/// Project response with its derived completion percentage.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// ID of the project.
    pub project_id: Uuid,
    /// Name of the project.
    pub name: String,
    /// Description of the project goals.
    pub description: Option<String>,
    /// Planned start date.
    pub starts_on: Date,
    /// Planned end date.
    pub ends_on: Date,
    /// Account managing the project, if any.
    pub manager: Option<AccountSummary>,
    /// Current execution status.
    pub status: WorkStatus,
    /// Percentage of done stages, in `[0, 100]`.
    pub completion: u8,
    /// Soft-active flag.
    pub is_active: bool,
    /// Timestamp when the project was created.
    pub created_at: OffsetDateTime,
    /// Timestamp when the project was last updated.
    pub updated_at: OffsetDateTime,
}

impl Project {
    /// Creates a new instance of [`Project`] from a project overview.
    pub fn from_overview(overview: ProjectOverview) -> Self {
        let manager = overview.manager.map(AccountSummary::from_model);
        Self::from_parts(overview.project, manager, overview.completion)
    }

    /// Creates a new instance of [`Project`] from its parts.
    pub fn from_parts(
        project: model::Project,
        manager: Option<AccountSummary>,
        completion: u8,
    ) -> Self {
        Self {
            project_id: project.id,
            name: project.name,
            description: project.description,
            starts_on: project.starts_on,
            ends_on: project.ends_on,
            manager,
            status: project.status,
            completion,
            is_active: project.is_active,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

/// Stage response with its derived completion percentage.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    /// ID of the stage.
    pub stage_id: Uuid,
    /// ID of the owning project.
    pub project_id: Uuid,
    /// Name of the stage.
    pub name: String,
    /// Description of the stage.
    pub description: Option<String>,
    /// Planned start date.
    pub starts_on: Date,
    /// Planned end date.
    pub ends_on: Date,
    /// Team membership responsible for the stage, if any.
    pub responsible_id: Option<Uuid>,
    /// Current execution status.
    pub status: WorkStatus,
    /// Percentage of done tasks, in `[0, 100]`.
    pub completion: u8,
    /// Soft-active flag.
    pub is_active: bool,
    /// Timestamp when the stage was created.
    pub created_at: OffsetDateTime,
    /// Timestamp when the stage was last updated.
    pub updated_at: OffsetDateTime,
}

impl Stage {
    /// Creates a new instance of [`Stage`] from a stage overview.
    pub fn from_overview(overview: StageOverview) -> Self {
        let stage = overview.stage;
        Self {
            stage_id: stage.id,
            project_id: stage.project_id,
            name: stage.name,
            description: stage.description,
            starts_on: stage.starts_on,
            ends_on: stage.ends_on,
            responsible_id: stage.responsible_id,
            status: stage.status,
            completion: overview.completion,
            is_active: stage.is_active,
            created_at: stage.created_at,
            updated_at: stage.updated_at,
        }
    }
}

/// Team membership response.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// ID of the team membership.
    pub member_id: Uuid,
    /// ID of the project the member belongs to.
    pub project_id: Uuid,
    /// ID of the member's account.
    pub account_id: Uuid,
    /// Role the member plays in this project.
    pub member_role: String,
    /// Soft-active flag.
    pub is_active: bool,
    /// Timestamp when the membership was created.
    pub created_at: OffsetDateTime,
}

impl TeamMember {
    /// Creates a new instance of [`TeamMember`].
    pub fn from_model(member: model::TeamMember) -> Self {
        Self {
            member_id: member.id,
            project_id: member.project_id,
            account_id: member.account_id,
            member_role: member.member_role,
            is_active: member.is_active,
            created_at: member.created_at,
        }
    }
}
