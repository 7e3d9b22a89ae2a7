//! Request payload types for the JSON API.
//!
//! All payloads deserialize from camelCase JSON and carry their own
//! validation rules. Each type converts into the matching database model
//! through `into_model`.

use planline_postgres::model::{
    NewProject, NewTeamMember, UpdateProject as UpdateProjectModel,
};
use planline_postgres::query;
use planline_postgres::types::WorkStatus;
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;
use validator::Validate;

/// Path parameters for project-scoped routes.
#[must_use]
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPathParams {
    /// ID of the project.
    pub project_id: Uuid,
}

/// Path parameters for member-scoped routes.
#[must_use]
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPathParams {
    /// ID of the owning project.
    pub project_id: Uuid,
    /// ID of the team membership.
    pub member_id: Uuid,
}

/// Pagination query parameters for list endpoints.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Maximum number of records to return (1-1000, default 50).
    pub limit: Option<i64>,
    /// Number of records to skip (default 0).
    pub offset: Option<i64>,
}

impl From<Pagination> for query::Pagination {
    fn from(pagination: Pagination) -> Self {
        query::Pagination::new(
            pagination.limit.unwrap_or(50),
            pagination.offset.unwrap_or(0),
        )
    }
}

/// Request payload for creating a new project.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    /// Name of the project (1-120 characters).
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Optional description of the project goals (max 2000 characters).
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Planned start date.
    pub starts_on: Date,
    /// Planned end date, must not be earlier than the start date.
    pub ends_on: Date,
    /// Optional account ID of the project manager.
    pub manager_id: Option<Uuid>,
    /// Initial status, defaults to not started.
    pub status: Option<WorkStatus>,
}

impl CreateProject {
    /// Converts this request into a [`NewProject`] model for insertion.
    #[inline]
    pub fn into_model(self) -> NewProject {
        NewProject {
            name: self.name,
            description: self.description,
            starts_on: self.starts_on,
            ends_on: self.ends_on,
            manager_id: self.manager_id,
            status: self.status,
        }
    }
}

/// Request payload to update an existing project.
///
/// All fields are optional; only provided fields will be updated.
/// Setting `manager_id` to null through `clear_manager` removes the
/// current manager.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    /// New name for the project (1-120 characters).
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    /// New description (max 2000 characters).
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// New planned start date.
    pub starts_on: Option<Date>,
    /// New planned end date.
    pub ends_on: Option<Date>,
    /// New manager account ID.
    pub manager_id: Option<Uuid>,
    /// Removes the current manager when set to true.
    pub clear_manager: Option<bool>,
    /// New execution status.
    pub status: Option<WorkStatus>,
    /// Soft-active flag.
    pub is_active: Option<bool>,
}

impl UpdateProject {
    /// Converts this request into an [`UpdateProjectModel`] changeset.
    pub fn into_model(self) -> UpdateProjectModel {
        let manager_id = if self.clear_manager.unwrap_or(false) {
            Some(None)
        } else {
            self.manager_id.map(Some)
        };

        UpdateProjectModel {
            name: self.name,
            description: self.description,
            starts_on: self.starts_on,
            ends_on: self.ends_on,
            manager_id,
            status: self.status,
            is_active: self.is_active,
        }
    }
}

/// Request payload for adding a member to a project team.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddTeamMember {
    /// ID of the account to add to the team.
    pub account_id: Uuid,
    /// Role the member plays in this project (1-64 characters).
    #[validate(length(min = 1, max = 64))]
    pub member_role: String,
}

impl AddTeamMember {
    /// Converts this request into a [`NewTeamMember`] model for insertion.
    #[inline]
    pub fn into_model(self, project_id: Uuid) -> NewTeamMember {
        NewTeamMember {
            project_id,
            account_id: self.account_id,
            member_role: self.member_role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let pagination: query::Pagination = Pagination::default().into();
        assert_eq!(pagination.limit, 50);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn create_project_requires_name() {
        let request = CreateProject {
            name: String::new(),
            description: None,
            starts_on: time::macros::date!(2026 - 01 - 01),
            ends_on: time::macros::date!(2026 - 06 - 30),
            manager_id: None,
            status: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn clear_manager_overrides_manager_id() {
        let request = UpdateProject {
            manager_id: Some(Uuid::new_v4()),
            clear_manager: Some(true),
            ..Default::default()
        };

        let changes = request.into_model();
        assert_eq!(changes.manager_id, Some(None));
    }

    #[test]
    fn absent_manager_id_leaves_field_untouched() {
        let request = UpdateProject::default();
        let changes = request.into_model();
        assert_eq!(changes.manager_id, None);
    }

    #[test]
    fn empty_patch_body_converts_to_a_changeset_without_changes() {
        let changes = UpdateProject::default().into_model();
        assert!(!changes.has_changes());

        let changes = UpdateProject {
            is_active: Some(false),
            ..Default::default()
        }
        .into_model();
        assert!(changes.has_changes());
    }
}
