//! Profile repository for account profiles.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Profile, UpdateProfile};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for profile database operations.
///
/// Profiles are created by [`AccountRepository::create_account`], never
/// here; this repository only reads and updates them.
///
/// [`AccountRepository::create_account`]: super::AccountRepository::create_account
pub trait ProfileRepository {
    /// Finds the profile belonging to an account.
    fn find_profile_for_account(
        &mut self,
        owner_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Profile>>> + Send;

    /// Updates the profile belonging to an account with partial changes.
    fn update_profile_for_account(
        &mut self,
        owner_id: Uuid,
        changes: UpdateProfile,
    ) -> impl Future<Output = PgResult<Profile>> + Send;
}

impl ProfileRepository for PgConnection {
    async fn find_profile_for_account(&mut self, owner_id: Uuid) -> PgResult<Option<Profile>> {
        use schema::profiles::dsl::*;

        let profile = profiles
            .filter(account_id.eq(owner_id))
            .select(Profile::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(profile)
    }

    async fn update_profile_for_account(
        &mut self,
        owner_id: Uuid,
        changes: UpdateProfile,
    ) -> PgResult<Profile> {
        use schema::profiles::dsl::*;

        if !changes.has_changes() {
            let profile = self.find_profile_for_account(owner_id).await?;
            return profile.ok_or(PgError::Query(diesel::result::Error::NotFound));
        }

        let profile = diesel::update(profiles.filter(account_id.eq(owner_id)))
            .set(&changes)
            .returning(Profile::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(profile)
    }
}
