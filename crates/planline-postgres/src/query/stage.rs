//! Stage repository for project phases.

use std::collections::HashMap;
use std::future::Future;

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use super::team_member::ensure_member_in_project;
use crate::model::{NewStage, Stage, UpdateStage};
use crate::types::{ArtifactKind, WorkStatus, completion_percentage};
use crate::{PgConnection, PgError, PgResult, schema};

/// A stage row with its derived completion percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOverview {
    /// The stage itself.
    pub stage: Stage,
    /// Percentage of done tasks, in `[0, 100]`.
    pub completion: u8,
}

/// Repository for stage database operations.
pub trait StageRepository {
    /// Creates a new stage in a project.
    ///
    /// A provided responsible must be a membership of the same project;
    /// anything else is rejected before the insert.
    fn create_stage(&mut self, stage: NewStage) -> impl Future<Output = PgResult<Stage>> + Send;

    /// Finds a stage by its unique identifier.
    fn find_stage(&mut self, stage_id: Uuid) -> impl Future<Output = PgResult<Option<Stage>>> + Send;

    /// Updates a stage with partial changes.
    ///
    /// An empty changeset reads the current row back. A new responsible
    /// must be a membership of the stage's own project.
    fn update_stage(
        &mut self,
        stage_id: Uuid,
        changes: UpdateStage,
    ) -> impl Future<Output = PgResult<Stage>> + Send;

    /// Permanently deletes a stage, its tasks and their artifacts.
    ///
    /// Tasks ride the foreign-key cascade; artifacts of the stage and of
    /// its tasks are swept in the same transaction. Returns whether a
    /// stage row was actually deleted.
    fn delete_stage(&mut self, stage_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists the stages of a project ordered by start date.
    fn list_project_stages(
        &mut self,
        proj_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<Stage>>> + Send;

    /// Lists the stages of a project with derived completion percentages.
    fn list_project_stages_with_progress(
        &mut self,
        proj_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<StageOverview>>> + Send;

    /// Computes the completion percentage of one stage.
    ///
    /// The fraction of the stage's tasks whose status is done, as an
    /// integer percent; `0` for a stage without tasks.
    fn stage_completion(&mut self, stage_id: Uuid) -> impl Future<Output = PgResult<u8>> + Send;
}

impl StageRepository for PgConnection {
    async fn create_stage(&mut self, stage: NewStage) -> PgResult<Stage> {
        use schema::stages;

        if let Some(member_id) = stage.responsible_id {
            ensure_member_in_project(self, member_id, stage.project_id).await?;
        }

        let stage = diesel::insert_into(stages::table)
            .values(&stage)
            .returning(Stage::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(stage)
    }

    async fn find_stage(&mut self, stage_id: Uuid) -> PgResult<Option<Stage>> {
        use schema::stages::dsl::*;

        let stage = stages
            .find(stage_id)
            .select(Stage::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(stage)
    }

    async fn update_stage(&mut self, stage_id: Uuid, changes: UpdateStage) -> PgResult<Stage> {
        use schema::stages::dsl::*;

        if !changes.has_changes() {
            let stage = self.find_stage(stage_id).await?;
            return stage.ok_or(PgError::Query(diesel::result::Error::NotFound));
        }

        if let Some(Some(member_id)) = changes.responsible_id {
            let owning_project: Option<Uuid> = stages
                .find(stage_id)
                .select(project_id)
                .first(self)
                .await
                .optional()
                .map_err(PgError::from)?;
            let owning_project =
                owning_project.ok_or(PgError::Query(diesel::result::Error::NotFound))?;

            ensure_member_in_project(self, member_id, owning_project).await?;
        }

        let stage = diesel::update(stages.find(stage_id))
            .set(&changes)
            .returning(Stage::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(stage)
    }

    async fn delete_stage(&mut self, stage_id: Uuid) -> PgResult<bool> {
        use schema::{artifacts, stages, tasks};

        self.transaction::<_, PgError, _>(|conn| {
            async move {
                let task_ids: Vec<Uuid> = tasks::table
                    .filter(tasks::stage_id.eq(stage_id))
                    .select(tasks::id)
                    .load(conn)
                    .await?;

                diesel::delete(
                    artifacts::table.filter(
                        artifacts::target_kind
                            .eq(ArtifactKind::Stage)
                            .and(artifacts::target_id.eq(stage_id))
                            .or(artifacts::target_kind
                                .eq(ArtifactKind::Task)
                                .and(artifacts::target_id.eq_any(&task_ids))),
                    ),
                )
                .execute(conn)
                .await?;

                let deleted = diesel::delete(stages::table.find(stage_id))
                    .execute(conn)
                    .await?;

                Ok(deleted > 0)
            }
            .scope_boxed()
        })
        .await
    }

    async fn list_project_stages(&mut self, proj_id: Uuid) -> PgResult<Vec<Stage>> {
        use schema::stages::dsl::*;

        let records = stages
            .filter(project_id.eq(proj_id))
            .select(Stage::as_select())
            .order((starts_on.asc(), created_at.asc()))
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(records)
    }

    async fn list_project_stages_with_progress(
        &mut self,
        proj_id: Uuid,
    ) -> PgResult<Vec<StageOverview>> {
        use schema::tasks;

        let records = self.list_project_stages(proj_id).await?;
        let stage_ids: Vec<Uuid> = records.iter().map(|stage| stage.id).collect();

        let totals: Vec<(Uuid, i64)> = tasks::table
            .filter(tasks::stage_id.eq_any(&stage_ids))
            .group_by(tasks::stage_id)
            .select((tasks::stage_id, count_star()))
            .load(self)
            .await
            .map_err(PgError::from)?;

        let done: Vec<(Uuid, i64)> = tasks::table
            .filter(tasks::stage_id.eq_any(&stage_ids))
            .filter(tasks::status.eq(WorkStatus::Done))
            .group_by(tasks::stage_id)
            .select((tasks::stage_id, count_star()))
            .load(self)
            .await
            .map_err(PgError::from)?;

        let totals: HashMap<Uuid, i64> = totals.into_iter().collect();
        let done: HashMap<Uuid, i64> = done.into_iter().collect();

        let overviews = records
            .into_iter()
            .map(|stage| {
                let total = totals.get(&stage.id).copied().unwrap_or(0);
                let completed = done.get(&stage.id).copied().unwrap_or(0);
                StageOverview {
                    completion: completion_percentage(completed, total),
                    stage,
                }
            })
            .collect();

        Ok(overviews)
    }

    async fn stage_completion(&mut self, target_stage: Uuid) -> PgResult<u8> {
        use schema::tasks::dsl::*;

        let total: i64 = tasks
            .filter(stage_id.eq(target_stage))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        let completed: i64 = tasks
            .filter(stage_id.eq(target_stage))
            .filter(status.eq(WorkStatus::Done))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(completion_percentage(completed, total))
    }
}
