//! Project repository for the root of the work breakdown.

use std::collections::HashMap;
use std::future::Future;

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use super::Pagination;
use crate::model::{Account, NewProject, Project, UpdateProject};
use crate::types::{ArtifactKind, WorkStatus, completion_percentage};
use crate::{PgConnection, PgError, PgResult, schema};

/// A project row joined with its manager and derived completion.
///
/// Shape of the listing read path: the manager comes from an eager join
/// (no per-row lookups) and the completion percentage is derived from
/// stage counts at query time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectOverview {
    /// The project itself.
    pub project: Project,
    /// Manager account, if one is assigned and still exists.
    pub manager: Option<Account>,
    /// Percentage of done stages, in `[0, 100]`.
    pub completion: u8,
}

/// Repository for project database operations.
pub trait ProjectRepository {
    /// Creates a new project.
    fn create_project(
        &mut self,
        project: NewProject,
    ) -> impl Future<Output = PgResult<Project>> + Send;

    /// Finds a project by its unique identifier.
    fn find_project(
        &mut self,
        proj_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Project>>> + Send;

    /// Updates a project with partial changes.
    ///
    /// An empty changeset reads the current row back instead of issuing
    /// an update.
    fn update_project(
        &mut self,
        proj_id: Uuid,
        changes: UpdateProject,
    ) -> impl Future<Output = PgResult<Project>> + Send;

    /// Permanently deletes a project and everything it owns.
    ///
    /// Stages, tasks, team members and contacts ride the foreign-key
    /// cascades; artifacts attached to the project, its stages or its
    /// tasks carry no foreign key and are swept in the same transaction.
    /// Returns whether a project row was actually deleted.
    fn delete_project(&mut self, proj_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists projects ordered by creation time.
    fn list_projects(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Project>>> + Send;

    /// Lists projects with manager and derived completion percentage.
    ///
    /// Ordered by creation time with the manager joined eagerly and per
    /// project completion computed from grouped stage counts.
    fn list_projects_with_progress(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<ProjectOverview>>> + Send;

    /// Computes the completion percentage of one project.
    ///
    /// The fraction of the project's stages whose status is done, as an
    /// integer percent; `0` for a project without stages. Never stored,
    /// so it cannot go stale.
    fn project_completion(&mut self, proj_id: Uuid) -> impl Future<Output = PgResult<u8>> + Send;
}

impl ProjectRepository for PgConnection {
    async fn create_project(&mut self, project: NewProject) -> PgResult<Project> {
        use schema::projects;

        let project = diesel::insert_into(projects::table)
            .values(&project)
            .returning(Project::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(project)
    }

    async fn find_project(&mut self, proj_id: Uuid) -> PgResult<Option<Project>> {
        use schema::projects::dsl::*;

        let project = projects
            .find(proj_id)
            .select(Project::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(project)
    }

    async fn update_project(&mut self, proj_id: Uuid, changes: UpdateProject) -> PgResult<Project> {
        use schema::projects::dsl::*;

        // An empty changeset is a plain read, not a query error.
        if !changes.has_changes() {
            let project = self.find_project(proj_id).await?;
            return project.ok_or(PgError::Query(diesel::result::Error::NotFound));
        }

        let project = diesel::update(projects.find(proj_id))
            .set(&changes)
            .returning(Project::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(project)
    }

    async fn delete_project(&mut self, proj_id: Uuid) -> PgResult<bool> {
        use schema::{artifacts, projects, stages, tasks};

        self.transaction::<_, PgError, _>(|conn| {
            async move {
                let stage_ids: Vec<Uuid> = stages::table
                    .filter(stages::project_id.eq(proj_id))
                    .select(stages::id)
                    .load(conn)
                    .await?;

                let task_ids: Vec<Uuid> = tasks::table
                    .filter(tasks::stage_id.eq_any(&stage_ids))
                    .select(tasks::id)
                    .load(conn)
                    .await?;

                diesel::delete(
                    artifacts::table.filter(
                        artifacts::target_kind
                            .eq(ArtifactKind::Project)
                            .and(artifacts::target_id.eq(proj_id))
                            .or(artifacts::target_kind
                                .eq(ArtifactKind::Stage)
                                .and(artifacts::target_id.eq_any(&stage_ids)))
                            .or(artifacts::target_kind
                                .eq(ArtifactKind::Task)
                                .and(artifacts::target_id.eq_any(&task_ids))),
                    ),
                )
                .execute(conn)
                .await?;

                let deleted = diesel::delete(projects::table.find(proj_id))
                    .execute(conn)
                    .await?;

                Ok(deleted > 0)
            }
            .scope_boxed()
        })
        .await
    }

    async fn list_projects(&mut self, pagination: Pagination) -> PgResult<Vec<Project>> {
        use schema::projects::dsl::*;

        let records = projects
            .select(Project::as_select())
            .order(created_at.asc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(records)
    }

    async fn list_projects_with_progress(
        &mut self,
        pagination: Pagination,
    ) -> PgResult<Vec<ProjectOverview>> {
        use schema::{accounts, projects, stages};

        let rows: Vec<(Project, Option<Account>)> = projects::table
            .left_join(accounts::table)
            .select((Project::as_select(), Option::<Account>::as_select()))
            .order(projects::created_at.asc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(self)
            .await
            .map_err(PgError::from)?;

        let proj_ids: Vec<Uuid> = rows.iter().map(|(project, _)| project.id).collect();

        let totals: Vec<(Uuid, i64)> = stages::table
            .filter(stages::project_id.eq_any(&proj_ids))
            .group_by(stages::project_id)
            .select((stages::project_id, count_star()))
            .load(self)
            .await
            .map_err(PgError::from)?;

        let done: Vec<(Uuid, i64)> = stages::table
            .filter(stages::project_id.eq_any(&proj_ids))
            .filter(stages::status.eq(WorkStatus::Done))
            .group_by(stages::project_id)
            .select((stages::project_id, count_star()))
            .load(self)
            .await
            .map_err(PgError::from)?;

        let totals: HashMap<Uuid, i64> = totals.into_iter().collect();
        let done: HashMap<Uuid, i64> = done.into_iter().collect();

        let overviews = rows
            .into_iter()
            .map(|(project, manager)| {
                let total = totals.get(&project.id).copied().unwrap_or(0);
                let completed = done.get(&project.id).copied().unwrap_or(0);
                ProjectOverview {
                    completion: completion_percentage(completed, total),
                    project,
                    manager,
                }
            })
            .collect();

        Ok(overviews)
    }

    async fn project_completion(&mut self, proj_id: Uuid) -> PgResult<u8> {
        use schema::stages::dsl::*;

        let total: i64 = stages
            .filter(project_id.eq(proj_id))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let completed: i64 = stages
            .filter(project_id.eq(proj_id))
            .filter(status.eq(WorkStatus::Done))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(completion_percentage(completed, total))
    }
}
