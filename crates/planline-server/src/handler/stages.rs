//! Stage listing handlers.

use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use planline_postgres::query::{ProjectRepository, StageRepository};

use crate::AppState;
use crate::error::{ErrorKind, Result};
use crate::extract::PgPool;
use crate::handler::request::ProjectPathParams;
use crate::handler::response::Stage;

/// Tracing target for stage operations.
const TRACING_TARGET: &str = "planline_server::handler::stages";

/// Returns the routes for stage operations.
pub(crate) fn routes() -> axum::Router<AppState> {
    axum::Router::new().route("/projects/{project_id}/stages", get(list_stages))
}

/// Lists the stages of a project with their derived completion percentages.
///
/// Stages are ordered by planned start date. Each completion percentage
/// comes from a grouped count over the stage's tasks rather than from a
/// per-stage query.
#[tracing::instrument(skip_all, fields(project_id = %path_params.project_id))]
async fn list_stages(
    PgPool(mut conn): PgPool,
    Path(path_params): Path<ProjectPathParams>,
) -> Result<(StatusCode, Json<Vec<Stage>>)> {
    if conn.find_project(path_params.project_id).await?.is_none() {
        return Err(ErrorKind::NotFound
            .with_message(format!("Project not found: {}", path_params.project_id))
            .with_resource("project"));
    }

    let overviews = conn
        .list_project_stages_with_progress(path_params.project_id)
        .await?;
    let stages: Vec<Stage> = overviews.into_iter().map(Stage::from_overview).collect();

    tracing::debug!(
        target: TRACING_TARGET,
        stage_count = stages.len(),
        "Stages listed",
    );

    Ok((StatusCode::OK, Json(stages)))
}
