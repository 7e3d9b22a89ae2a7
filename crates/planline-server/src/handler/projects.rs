//! Project management handlers for CRUD operations.
//!
//! Projects are the root of the work breakdown. Every read path reports
//! the completion percentage derived from the project's stages, and
//! deleting a project sweeps the artifacts attached anywhere in its
//! subtree.

use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::get;
use planline_postgres::query::{AccountRepository, ProjectRepository};

use crate::AppState;
use crate::error::{ErrorKind, Result};
use crate::extract::{PgPool, ValidateJson};
use crate::handler::request::{CreateProject, Pagination, ProjectPathParams, UpdateProject};
use crate::handler::response::{AccountSummary, Project};

/// Tracing target for project operations.
const TRACING_TARGET: &str = "planline_server::handler::projects";

/// Returns the routes for project operations.
pub(crate) fn routes() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{project_id}",
            get(read_project).patch(update_project).delete(delete_project),
        )
}

/// Creates a new project.
#[tracing::instrument(skip_all)]
async fn create_project(
    PgPool(mut conn): PgPool,
    ValidateJson(request): ValidateJson<CreateProject>,
) -> Result<(StatusCode, Json<Project>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating project");

    let project = conn.create_project(request.into_model()).await?;
    let manager = match project.manager_id {
        Some(manager_id) => conn
            .find_account_by_id(manager_id)
            .await?
            .map(AccountSummary::from_model),
        None => None,
    };

    // A freshly created project has no stages yet.
    let response = Project::from_parts(project, manager, 0);

    tracing::info!(
        target: TRACING_TARGET,
        project_id = %response.project_id,
        "Project created",
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// Lists projects with their derived completion percentages.
///
/// Managers are fetched eagerly alongside the projects so the listing
/// issues a constant number of queries regardless of page size.
#[tracing::instrument(skip_all)]
async fn list_projects(
    PgPool(mut conn): PgPool,
    Query(pagination): Query<Pagination>,
) -> Result<(StatusCode, Json<Vec<Project>>)> {
    let overviews = conn.list_projects_with_progress(pagination.into()).await?;
    let projects: Vec<Project> = overviews.into_iter().map(Project::from_overview).collect();

    tracing::debug!(
        target: TRACING_TARGET,
        project_count = projects.len(),
        "Projects listed",
    );

    Ok((StatusCode::OK, Json(projects)))
}

/// Retrieves a single project with its completion percentage.
#[tracing::instrument(skip_all, fields(project_id = %path_params.project_id))]
async fn read_project(
    PgPool(mut conn): PgPool,
    Path(path_params): Path<ProjectPathParams>,
) -> Result<(StatusCode, Json<Project>)> {
    let Some(project) = conn.find_project(path_params.project_id).await? else {
        return Err(ErrorKind::NotFound
            .with_message(format!("Project not found: {}", path_params.project_id))
            .with_resource("project"));
    };

    let completion = conn.project_completion(project.id).await?;
    let manager = match project.manager_id {
        Some(manager_id) => conn
            .find_account_by_id(manager_id)
            .await?
            .map(AccountSummary::from_model),
        None => None,
    };

    let response = Project::from_parts(project, manager, completion);
    Ok((StatusCode::OK, Json(response)))
}

/// Updates an existing project.
#[tracing::instrument(skip_all, fields(project_id = %path_params.project_id))]
async fn update_project(
    PgPool(mut conn): PgPool,
    Path(path_params): Path<ProjectPathParams>,
    ValidateJson(request): ValidateJson<UpdateProject>,
) -> Result<(StatusCode, Json<Project>)> {
    let project = conn
        .update_project(path_params.project_id, request.into_model())
        .await?;

    let completion = conn.project_completion(project.id).await?;
    let manager = match project.manager_id {
        Some(manager_id) => conn
            .find_account_by_id(manager_id)
            .await?
            .map(AccountSummary::from_model),
        None => None,
    };

    tracing::info!(target: TRACING_TARGET, "Project updated");

    let response = Project::from_parts(project, manager, completion);
    Ok((StatusCode::OK, Json(response)))
}

/// Deletes a project together with its stages, tasks and artifacts.
///
/// Stages and tasks are removed by the database cascade; artifacts are
/// swept in the same transaction because they reference their targets
/// without foreign keys.
#[tracing::instrument(skip_all, fields(project_id = %path_params.project_id))]
async fn delete_project(
    PgPool(mut conn): PgPool,
    Path(path_params): Path<ProjectPathParams>,
) -> Result<StatusCode> {
    let deleted = conn.delete_project(path_params.project_id).await?;
    if !deleted {
        return Err(ErrorKind::NotFound
            .with_message(format!("Project not found: {}", path_params.project_id))
            .with_resource("project"));
    }

    tracing::info!(target: TRACING_TARGET, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}
