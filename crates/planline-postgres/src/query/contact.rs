//! Contact repository for project stakeholders.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Contact, NewContact, UpdateContact};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for contact database operations.
pub trait ContactRepository {
    /// Adds a new contact to a project.
    fn add_contact(&mut self, contact: NewContact)
    -> impl Future<Output = PgResult<Contact>> + Send;

    /// Finds a contact by its unique identifier.
    fn find_contact(
        &mut self,
        contact_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Contact>>> + Send;

    /// Updates a contact with partial changes.
    fn update_contact(
        &mut self,
        contact_id: Uuid,
        changes: UpdateContact,
    ) -> impl Future<Output = PgResult<Contact>> + Send;

    /// Permanently removes a contact.
    ///
    /// Returns whether a row was actually deleted.
    fn remove_contact(&mut self, contact_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists the contacts of a project ordered by name.
    fn list_project_contacts(
        &mut self,
        proj_id: Uuid,
    ) -> impl Future<Output = PgResult<Vec<Contact>>> + Send;
}

impl ContactRepository for PgConnection {
    async fn add_contact(&mut self, contact: NewContact) -> PgResult<Contact> {
        use schema::contacts;

        let contact = diesel::insert_into(contacts::table)
            .values(&contact)
            .returning(Contact::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(contact)
    }

    async fn find_contact(&mut self, contact_id: Uuid) -> PgResult<Option<Contact>> {
        use schema::contacts::dsl::*;

        let contact = contacts
            .find(contact_id)
            .select(Contact::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(contact)
    }

    async fn update_contact(
        &mut self,
        contact_id: Uuid,
        changes: UpdateContact,
    ) -> PgResult<Contact> {
        use schema::contacts::dsl::*;

        if !changes.has_changes() {
            let contact = self.find_contact(contact_id).await?;
            return contact.ok_or(PgError::Query(diesel::result::Error::NotFound));
        }

        let contact = diesel::update(contacts.find(contact_id))
            .set(&changes)
            .returning(Contact::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(contact)
    }

    async fn remove_contact(&mut self, contact_id: Uuid) -> PgResult<bool> {
        use schema::contacts::dsl::*;

        let deleted = diesel::delete(contacts.find(contact_id))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }

    async fn list_project_contacts(&mut self, proj_id: Uuid) -> PgResult<Vec<Contact>> {
        use schema::contacts::dsl::*;

        let records = contacts
            .filter(project_id.eq(proj_id))
            .select(Contact::as_select())
            .order(full_name.asc())
            .load(self)
            .await
            .map_err(PgError::from)?;

        Ok(records)
    }
}
