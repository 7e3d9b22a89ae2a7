//! Request extractors used by the handlers.

use axum::Json;
use axum::extract::{FromRef, FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut};
use planline_postgres::{PgClient, PgConn};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{Error, ErrorKind};

/// Extractor that provides a database connection from the pool.
///
/// Acquires a [`PgConn`] from the connection pool, which implements all
/// repository traits for database operations.
///
/// # Example
///
/// ```ignore
/// async fn read_project(PgPool(mut conn): PgPool) { /* ... */ }
/// ```
#[derive(Debug, Deref, DerefMut)]
pub struct PgPool(pub PgConn);

impl<S> FromRequestParts<S> for PgPool
where
    PgClient: FromRef<S>,
    S: Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pg_client = PgClient::from_ref(state);
        let conn = pg_client.get_connection().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to acquire database connection");
            ErrorKind::InternalServerError.with_message("Database connection unavailable")
        })?;

        Ok(PgPool(conn))
    }
}

/// JSON extractor with automatic validation through the `validator` crate.
///
/// Deserializes the request body as JSON and runs the payload's
/// validation rules before handing it to the handler. Works with any
/// type implementing both `serde::Deserialize` and `validator::Validate`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ErrorKind::BadRequest
                    .with_message(rejection.body_text())
                    .with_resource("request")
            })?;

        data.validate()?;
        Ok(Self(data))
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| match &error.message {
                    Some(message) => format!("Field '{}': {}", field, message),
                    None => format!("Field '{}' failed validation: {}", field, error.code),
                })
            })
            .collect();

        let user_message = match messages.as_slice() {
            [] => "Validation failed".to_string(),
            [single] => single.clone(),
            multiple => multiple.join(". "),
        };

        tracing::warn!(
            errors = ?errors.field_errors(),
            "Request validation failed"
        );

        ErrorKind::BadRequest
            .with_message(user_message)
            .with_resource("request")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, serde::Deserialize, Validate)]
    struct CreateThing {
        #[validate(length(min = 1, max = 16))]
        name: String,
    }

    #[test]
    fn validation_errors_map_to_bad_request() {
        let thing = CreateThing {
            name: String::new(),
        };
        let errors = thing.validate().unwrap_err();

        let error: Error<'static> = errors.into();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("request"));
        assert!(error.message().unwrap_or_default().contains("name"));
    }
}
