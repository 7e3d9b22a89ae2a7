//! Account repository for managing user accounts.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use super::Pagination;
use crate::model::{Account, NewAccount, NewProfile, Profile, UpdateAccount};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for account database operations.
///
/// Handles account lifecycle management. Account creation is the one place
/// where profiles come into existence: the new account and its empty
/// profile are inserted in a single transaction, so an account can never
/// be observed without its profile.
pub trait AccountRepository {
    /// Creates a new account together with its profile.
    ///
    /// The profile starts with an empty phone number. Provisioning happens
    /// exactly once here; updates to the account never touch the profile,
    /// and the unique index on `profiles.account_id` rejects any attempt
    /// to provision a second one.
    fn create_account(
        &mut self,
        new_account: NewAccount,
    ) -> impl Future<Output = PgResult<(Account, Profile)>> + Send;

    /// Finds an account by its unique identifier.
    fn find_account_by_id(
        &mut self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Finds an account by its login name.
    fn find_account_by_username(
        &mut self,
        username: &str,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Updates an account with partial changes.
    fn update_account(
        &mut self,
        account_id: Uuid,
        changes: UpdateAccount,
    ) -> impl Future<Output = PgResult<Account>> + Send;

    /// Deactivates an account, keeping the row for history.
    ///
    /// Returns `None` if the account was not found.
    fn deactivate_account(
        &mut self,
        account_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Account>>> + Send;

    /// Lists accounts ordered by creation time.
    fn list_accounts(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Account>>> + Send;
}

impl AccountRepository for PgConnection {
    async fn create_account(&mut self, new_account: NewAccount) -> PgResult<(Account, Profile)> {
        use schema::{accounts, profiles};

        self.transaction::<_, PgError, _>(|conn| {
            async move {
                let account: Account = diesel::insert_into(accounts::table)
                    .values(&new_account)
                    .returning(Account::as_returning())
                    .get_result(conn)
                    .await?;

                let new_profile = NewProfile {
                    account_id: account.id,
                    phone: None,
                };

                let profile: Profile = diesel::insert_into(profiles::table)
                    .values(&new_profile)
                    .returning(Profile::as_returning())
                    .get_result(conn)
                    .await?;

                Ok((account, profile))
            }
            .scope_boxed()
        })
        .await
    }

    async fn find_account_by_id(&mut self, account_id: Uuid) -> PgResult<Option<Account>> {
        use schema::accounts::dsl::*;

        let account = accounts
            .find(account_id)
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(account)
    }

    async fn find_account_by_username(&mut self, name: &str) -> PgResult<Option<Account>> {
        use schema::accounts::dsl::*;

        let account = accounts
            .filter(username.eq(name))
            .select(Account::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(account)
    }

    async fn update_account(
        &mut self,
        account_id: Uuid,
        changes: UpdateAccount,
    ) -> PgResult<Account> {
        use schema::accounts::dsl::*;

        if !changes.has_changes() {
            let account = self.find_account_by_id(account_id).await?;
            return account.ok_or(PgError::Query(diesel::result::Error::NotFound));
        }

        let account = diesel::update(accounts.find(account_id))
            .set(&changes)
            .returning(Account::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(account)
    }

    async fn deactivate_account(&mut self, account_id: Uuid) -> PgResult<Option<Account>> {
        use schema::accounts::dsl::*;

        let account = diesel::update(accounts.find(account_id))
            .set(is_active.eq(false))
            .returning(Account::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(account)
    }

    async fn list_accounts(&mut self, pagination: Pagination) -> PgResult<Vec<Account>> {
        use schema::accounts::dsl::*;

        let records = accounts
            .select(Account::as_select())
            .order(created_at.asc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(records)
    }
}
