//! Task repository for the smallest units of work.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use super::team_member::ensure_member_in_project;
use crate::model::{NewTask, Task, UpdateTask};
use crate::types::ArtifactKind;
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for task database operations.
pub trait TaskRepository {
    /// Creates a new task in a stage.
    ///
    /// A provided assignee must be a membership of the project owning
    /// the task's stage; anything else is rejected before the insert.
    fn create_task(&mut self, task: NewTask) -> impl Future<Output = PgResult<Task>> + Send;

    /// Finds a task by its unique identifier.
    fn find_task(&mut self, task_id: Uuid) -> impl Future<Output = PgResult<Option<Task>>> + Send;

    /// Updates a task with partial changes.
    ///
    /// An empty changeset reads the current row back. A new assignee
    /// must be a membership of the owning project.
    fn update_task(
        &mut self,
        task_id: Uuid,
        changes: UpdateTask,
    ) -> impl Future<Output = PgResult<Task>> + Send;

    /// Permanently deletes a task and its artifacts.
    ///
    /// Returns whether a task row was actually deleted.
    fn delete_task(&mut self, task_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists the tasks of a stage ordered by start date.
    fn list_stage_tasks(
        &mut self,
        owning_stage: Uuid,
    ) -> impl Future<Output = PgResult<Vec<Task>>> + Send;
}

impl TaskRepository for PgConnection {
    async fn create_task(&mut self, task: NewTask) -> PgResult<Task> {
        use schema::{stages, tasks};

        if let Some(member_id) = task.assignee_id {
            let owning_project: Option<Uuid> = stages::table
                .find(task.stage_id)
                .select(stages::project_id)
                .first(self)
                .await
                .optional()
                .map_err(PgError::from)?;
            let owning_project =
                owning_project.ok_or(PgError::Query(diesel::result::Error::NotFound))?;

            ensure_member_in_project(self, member_id, owning_project).await?;
        }

        let task = diesel::insert_into(tasks::table)
            .values(&task)
            .returning(Task::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(task)
    }

    async fn find_task(&mut self, task_id: Uuid) -> PgResult<Option<Task>> {
        use schema::tasks::dsl::*;

        let task = tasks
            .find(task_id)
            .select(Task::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(task)
    }

    async fn update_task(&mut self, task_id: Uuid, changes: UpdateTask) -> PgResult<Task> {
        use schema::{stages, tasks::dsl::*};

        if !changes.has_changes() {
            let task = self.find_task(task_id).await?;
            return task.ok_or(PgError::Query(diesel::result::Error::NotFound));
        }

        if let Some(Some(member_id)) = changes.assignee_id {
            let owning_project: Option<Uuid> = tasks
                .find(task_id)
                .inner_join(stages::table)
                .select(stages::project_id)
                .first(self)
                .await
                .optional()
                .map_err(PgError::from)?;
            let owning_project =
                owning_project.ok_or(PgError::Query(diesel::result::Error::NotFound))?;

            ensure_member_in_project(self, member_id, owning_project).await?;
        }

        let task = diesel::update(tasks.find(task_id))
            .set(&changes)
            .returning(Task::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(task)
    }

    async fn delete_task(&mut self, task_id: Uuid) -> PgResult<bool> {
        use schema::{artifacts, tasks};

        self.transaction::<_, PgError, _>(|conn| {
            async move {
                diesel::delete(
                    artifacts::table.filter(
                        artifacts::target_kind
                            .eq(ArtifactKind::Task)
                            .and(artifacts::target_id.eq(task_id)),
                    ),
                )
                .execute(conn)
                .await?;

                let deleted = diesel::delete(tasks::table.find(task_id))
                    .execute(conn)
                    .await?;

                Ok(deleted > 0)
            }
            .scope_boxed()
        })
        .await
    }

    async fn list_stage_tasks(&mut self, owning_stage: Uuid) -> PgResult<Vec<Task>> {
        use schema::tasks::dsl::*;

        let records = tasks
            .filter(stage_id.eq(owning_stage))
            .select(Task::as_select())
            .order((starts_on.asc(), created_at.asc()))
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(records)
    }
}
