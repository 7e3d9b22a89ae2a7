//! Team membership handlers.
//!
//! Memberships tie accounts to projects. Each account can hold at most
//! one membership per project; the database reports duplicates as a
//! uniqueness violation which surfaces as a 409 response.

use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use planline_postgres::query::{AccountRepository, ProjectRepository, TeamMemberRepository};

use crate::AppState;
use crate::error::{ErrorKind, Result};
use crate::extract::{PgPool, ValidateJson};
use crate::handler::request::{AddTeamMember, MemberPathParams, Pagination, ProjectPathParams};
use crate::handler::response::TeamMember;

/// Tracing target for team membership operations.
const TRACING_TARGET: &str = "planline_server::handler::members";

/// Returns the routes for team membership operations.
pub(crate) fn routes() -> axum::Router<AppState> {
    axum::Router::new()
        .route(
            "/projects/{project_id}/members",
            get(list_members).post(add_member),
        )
        .route(
            "/projects/{project_id}/members/{member_id}",
            delete(remove_member),
        )
}

/// Lists the team members of a project.
#[tracing::instrument(skip_all, fields(project_id = %path_params.project_id))]
async fn list_members(
    PgPool(mut conn): PgPool,
    Path(path_params): Path<ProjectPathParams>,
    Query(pagination): Query<Pagination>,
) -> Result<(StatusCode, Json<Vec<TeamMember>>)> {
    if conn.find_project(path_params.project_id).await?.is_none() {
        return Err(ErrorKind::NotFound
            .with_message(format!("Project not found: {}", path_params.project_id))
            .with_resource("project"));
    }

    let members = conn
        .list_team_members(path_params.project_id, pagination.into())
        .await?;
    let members: Vec<TeamMember> = members.into_iter().map(TeamMember::from_model).collect();

    tracing::debug!(
        target: TRACING_TARGET,
        member_count = members.len(),
        "Team members listed",
    );

    Ok((StatusCode::OK, Json(members)))
}

/// Adds an account to a project team.
#[tracing::instrument(skip_all, fields(project_id = %path_params.project_id))]
async fn add_member(
    PgPool(mut conn): PgPool,
    Path(path_params): Path<ProjectPathParams>,
    ValidateJson(request): ValidateJson<AddTeamMember>,
) -> Result<(StatusCode, Json<TeamMember>)> {
    if conn.find_project(path_params.project_id).await?.is_none() {
        return Err(ErrorKind::NotFound
            .with_message(format!("Project not found: {}", path_params.project_id))
            .with_resource("project"));
    }

    if conn.find_account_by_id(request.account_id).await?.is_none() {
        return Err(ErrorKind::UnprocessableEntity
            .with_message(format!("Account not found: {}", request.account_id))
            .with_resource("account"));
    }

    let member = conn
        .add_team_member(request.into_model(path_params.project_id))
        .await?;
    let response = TeamMember::from_model(member);

    tracing::info!(
        target: TRACING_TARGET,
        member_id = %response.member_id,
        account_id = %response.account_id,
        "Team member added",
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// Removes a member from a project team.
///
/// Stages and tasks assigned to the member keep existing; the database
/// clears their responsible and assignee references in the same statement.
#[tracing::instrument(
    skip_all,
    fields(
        project_id = %path_params.project_id,
        member_id = %path_params.member_id,
    )
)]
async fn remove_member(
    PgPool(mut conn): PgPool,
    Path(path_params): Path<MemberPathParams>,
) -> Result<StatusCode> {
    let Some(member) = conn.find_team_member(path_params.member_id).await? else {
        return Err(ErrorKind::NotFound
            .with_message(format!("Team member not found: {}", path_params.member_id))
            .with_resource("team_member"));
    };

    if !member.belongs_to(path_params.project_id) {
        return Err(ErrorKind::NotFound
            .with_message(format!(
                "Team member {} does not belong to project {}",
                path_params.member_id, path_params.project_id
            ))
            .with_resource("team_member"));
    }

    conn.remove_team_member(path_params.member_id).await?;

    tracing::info!(target: TRACING_TARGET, "Team member removed");

    Ok(StatusCode::NO_CONTENT)
}
