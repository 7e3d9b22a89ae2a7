//! Artifact repository for polymorphic file attachments.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Artifact, AttachmentTarget, NewArtifact, Project, Stage, Task, UpdateArtifact};
use crate::types::ArtifactKind;
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for artifact database operations.
///
/// An artifact points at exactly one project, stage or task through its
/// `(target_kind, target_id)` pair. Resolution of that pair is an explicit
/// per-kind lookup, see [`resolve_attachment_target`].
///
/// [`resolve_attachment_target`]: ArtifactRepository::resolve_attachment_target
pub trait ArtifactRepository {
    /// Attaches a new artifact to its target.
    fn attach_artifact(
        &mut self,
        artifact: NewArtifact,
    ) -> impl Future<Output = PgResult<Artifact>> + Send;

    /// Finds an artifact by its unique identifier.
    fn find_artifact(
        &mut self,
        artifact_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Artifact>>> + Send;

    /// Updates an artifact with partial changes.
    fn update_artifact(
        &mut self,
        artifact_id: Uuid,
        changes: UpdateArtifact,
    ) -> impl Future<Output = PgResult<Artifact>> + Send;

    /// Permanently deletes an artifact.
    ///
    /// Returns whether a row was actually deleted.
    fn delete_artifact(
        &mut self,
        artifact_id: Uuid,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists artifacts attached to one target, newest first.
    fn list_artifacts_for_target(
        &mut self,
        kind: ArtifactKind,
        target: Uuid,
    ) -> impl Future<Output = PgResult<Vec<Artifact>>> + Send;

    /// Resolves a `(kind, id)` pair to the record it points at.
    ///
    /// Returns `None` when the target row no longer exists (the artifact
    /// is dangling).
    fn resolve_attachment_target(
        &mut self,
        kind: ArtifactKind,
        target: Uuid,
    ) -> impl Future<Output = PgResult<Option<AttachmentTarget>>> + Send;
}

impl ArtifactRepository for PgConnection {
    async fn attach_artifact(&mut self, artifact: NewArtifact) -> PgResult<Artifact> {
        use schema::artifacts;

        let artifact = diesel::insert_into(artifacts::table)
            .values(&artifact)
            .returning(Artifact::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(artifact)
    }

    async fn find_artifact(&mut self, artifact_id: Uuid) -> PgResult<Option<Artifact>> {
        use schema::artifacts::dsl::*;

        let artifact = artifacts
            .find(artifact_id)
            .select(Artifact::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(artifact)
    }

    async fn update_artifact(
        &mut self,
        artifact_id: Uuid,
        changes: UpdateArtifact,
    ) -> PgResult<Artifact> {
        use schema::artifacts::dsl::*;

        if !changes.has_changes() {
            let artifact = self.find_artifact(artifact_id).await?;
            return artifact.ok_or(PgError::Query(diesel::result::Error::NotFound));
        }

        let artifact = diesel::update(artifacts.find(artifact_id))
            .set(&changes)
            .returning(Artifact::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(artifact)
    }

    async fn delete_artifact(&mut self, artifact_id: Uuid) -> PgResult<bool> {
        use schema::artifacts::dsl::*;

        let deleted = diesel::delete(artifacts.find(artifact_id))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }

    async fn list_artifacts_for_target(
        &mut self,
        kind: ArtifactKind,
        target: Uuid,
    ) -> PgResult<Vec<Artifact>> {
        use schema::artifacts::dsl::*;

        let records = artifacts
            .filter(target_kind.eq(kind))
            .filter(target_id.eq(target))
            .select(Artifact::as_select())
            .order(created_at.desc())
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(records)
    }

    async fn resolve_attachment_target(
        &mut self,
        kind: ArtifactKind,
        target: Uuid,
    ) -> PgResult<Option<AttachmentTarget>> {
        use schema::{projects, stages, tasks};

        let resolved = match kind {
            ArtifactKind::Project => projects::table
                .find(target)
                .select(Project::as_select())
                .first(self)
                .await
                .optional()
                .map_err(PgError::from)?
                .map(AttachmentTarget::Project),
            ArtifactKind::Stage => stages::table
                .find(target)
                .select(Stage::as_select())
                .first(self)
                .await
                .optional()
                .map_err(PgError::from)?
                .map(AttachmentTarget::Stage),
            ArtifactKind::Task => tasks::table
                .find(target)
                .select(Task::as_select())
                .first(self)
                .await
                .optional()
                .map_err(PgError::from)?
                .map(AttachmentTarget::Task),
        };

        Ok(resolved)
    }
}
