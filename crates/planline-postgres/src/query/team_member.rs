//! Team member repository for managing project membership.

use std::future::Future;

use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewTeamMember, TeamMember, UpdateTeamMember};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for team member database operations.
///
/// Handles project membership management and assignment scoping: team
/// memberships are the only valid values for a stage's responsible and a
/// task's assignee, and the candidates must come from the owning
/// project's team.
pub trait TeamMemberRepository {
    /// Adds a new member to a project.
    ///
    /// An account holds exactly one role per project; a duplicate
    /// `(project, account)` pair is rejected by the database and surfaces
    /// as a uniqueness [`ConstraintViolation`], never as a silent
    /// overwrite.
    ///
    /// [`ConstraintViolation`]: crate::types::ConstraintViolation
    fn add_team_member(
        &mut self,
        member: NewTeamMember,
    ) -> impl Future<Output = PgResult<TeamMember>> + Send;

    /// Finds a membership by its unique identifier.
    fn find_team_member(
        &mut self,
        member_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<TeamMember>>> + Send;

    /// Finds the membership of an account in a project.
    fn find_membership(
        &mut self,
        proj_id: Uuid,
        member_account_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<TeamMember>>> + Send;

    /// Updates a membership with partial changes.
    ///
    /// An empty changeset reads the current row back instead of issuing
    /// an update.
    fn update_team_member(
        &mut self,
        member_id: Uuid,
        changes: UpdateTeamMember,
    ) -> impl Future<Output = PgResult<TeamMember>> + Send;

    /// Permanently removes a membership from its project.
    ///
    /// Stages and tasks referencing the membership keep their rows; the
    /// `responsible`/`assignee` references are cleared by the SET NULL
    /// foreign keys, atomically with this delete. Returns whether a row
    /// was actually deleted.
    fn remove_team_member(
        &mut self,
        member_id: Uuid,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists members of a project ordered by creation date.
    fn list_team_members(
        &mut self,
        proj_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<TeamMember>>> + Send;

    /// Lists memberships candidate for a stage's responsible field.
    ///
    /// With a resolvable stage id, only memberships of the stage's own
    /// project are returned. Without one (the stage does not exist yet,
    /// or the id is stale) the full membership set is exposed and the
    /// caller narrows it once the parent is known. Fail-open by design;
    /// this is a candidate list, not an authorization boundary.
    fn list_assignable_for_stage(
        &mut self,
        stage_id: Option<Uuid>,
    ) -> impl Future<Output = PgResult<Vec<TeamMember>>> + Send;

    /// Lists memberships candidate for a task's assignee field.
    ///
    /// Same contract as [`list_assignable_for_stage`], with the owning
    /// project found through the task's stage.
    ///
    /// [`list_assignable_for_stage`]: TeamMemberRepository::list_assignable_for_stage
    fn list_assignable_for_task(
        &mut self,
        task_id: Option<Uuid>,
    ) -> impl Future<Output = PgResult<Vec<TeamMember>>> + Send;
}

impl TeamMemberRepository for PgConnection {
    async fn add_team_member(&mut self, member: NewTeamMember) -> PgResult<TeamMember> {
        use schema::team_members;

        let member = diesel::insert_into(team_members::table)
            .values(&member)
            .returning(TeamMember::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(member)
    }

    async fn find_team_member(&mut self, member_id: Uuid) -> PgResult<Option<TeamMember>> {
        use schema::team_members::dsl::*;

        let member = team_members
            .find(member_id)
            .select(TeamMember::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(member)
    }

    async fn find_membership(
        &mut self,
        proj_id: Uuid,
        member_account_id: Uuid,
    ) -> PgResult<Option<TeamMember>> {
        use schema::team_members::dsl::*;

        let member = team_members
            .filter(project_id.eq(proj_id))
            .filter(account_id.eq(member_account_id))
            .select(TeamMember::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(member)
    }

    async fn update_team_member(
        &mut self,
        member_id: Uuid,
        changes: UpdateTeamMember,
    ) -> PgResult<TeamMember> {
        use schema::team_members::dsl::*;

        if !changes.has_changes() {
            let member = self.find_team_member(member_id).await?;
            return member.ok_or(PgError::Query(diesel::result::Error::NotFound));
        }

        let member = diesel::update(team_members.find(member_id))
            .set(&changes)
            .returning(TeamMember::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(member)
    }

    async fn remove_team_member(&mut self, member_id: Uuid) -> PgResult<bool> {
        use schema::team_members::dsl::*;

        let deleted = diesel::delete(team_members.find(member_id))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }

    async fn list_team_members(
        &mut self,
        proj_id: Uuid,
        pagination: Pagination,
    ) -> PgResult<Vec<TeamMember>> {
        use schema::team_members::dsl::*;

        let members = team_members
            .filter(project_id.eq(proj_id))
            .select(TeamMember::as_select())
            .order(created_at.asc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(members)
    }

    async fn list_assignable_for_stage(
        &mut self,
        stage_id: Option<Uuid>,
    ) -> PgResult<Vec<TeamMember>> {
        use schema::stages;

        let owning_project = match stage_id {
            Some(sid) => stages::table
                .find(sid)
                .select(stages::project_id)
                .first::<Uuid>(self)
                .await
                .optional()
                .map_err(PgError::from)?,
            None => None,
        };

        list_membership_candidates(self, owning_project).await
    }

    async fn list_assignable_for_task(
        &mut self,
        task_id: Option<Uuid>,
    ) -> PgResult<Vec<TeamMember>> {
        use schema::{stages, tasks};

        let owning_project = match task_id {
            Some(tid) => tasks::table
                .find(tid)
                .inner_join(stages::table)
                .select(stages::project_id)
                .first::<Uuid>(self)
                .await
                .optional()
                .map_err(PgError::from)?,
            None => None,
        };

        list_membership_candidates(self, owning_project).await
    }
}

/// Verifies that a membership belongs to the given project.
///
/// The foreign keys on `responsible_id` and `assignee_id` only prove a
/// membership exists somewhere; the project comparison happens here,
/// before the write. A missing membership counts as out of scope too.
pub(crate) async fn ensure_member_in_project(
    conn: &mut PgConnection,
    member_id: Uuid,
    proj_id: Uuid,
) -> PgResult<()> {
    use schema::team_members::dsl::*;

    let owning_project: Option<Uuid> = team_members
        .find(member_id)
        .select(project_id)
        .first(conn)
        .await
        .optional()
        .map_err(PgError::from)?;

    match owning_project {
        Some(found) if found == proj_id => Ok(()),
        _ => Err(PgError::MembershipScope {
            member_id,
            project_id: proj_id,
        }),
    }
}

/// Builds the candidate query, scoped to one project when one is known.
fn membership_candidates_query<'a>(
    owning_project: Option<Uuid>,
) -> schema::team_members::BoxedQuery<'a, Pg, SqlTypeOf<AsSelect<TeamMember, Pg>>> {
    use schema::team_members::dsl::*;

    let mut query = team_members
        .select(TeamMember::as_select())
        .order(created_at.asc())
        .into_boxed();

    if let Some(proj_id) = owning_project {
        query = query.filter(project_id.eq(proj_id));
    }

    query
}

/// Loads memberships of one project, or all of them when none is known.
async fn list_membership_candidates(
    conn: &mut PgConnection,
    owning_project: Option<Uuid>,
) -> PgResult<Vec<TeamMember>> {
    let members = membership_candidates_query(owning_project)
        .load(conn)
        .await
        .map_err(PgError::from)?;

    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_are_unscoped_without_a_parent() {
        let query = membership_candidates_query(None);
        let sql = diesel::debug_query::<Pg, _>(&query).to_string();
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn candidates_narrow_to_the_owning_project() {
        let query = membership_candidates_query(Some(Uuid::new_v4()));
        let sql = diesel::debug_query::<Pg, _>(&query).to_string();
        assert!(sql.contains("WHERE"));
    }
}
