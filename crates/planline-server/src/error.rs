//! HTTP error handling with a builder pattern for dynamic error responses.
//!
//! [`ErrorKind`] enumerates the failure categories the API can report,
//! [`Error`] carries an optional custom message and resource, and
//! [`ErrorResponse`] is the serialized JSON body. Database errors convert
//! into HTTP errors through the `From` impls at the bottom of the module,
//! including typed constraint violations.

use std::borrow::Cow;
use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use planline_postgres::PgError;
use planline_postgres::types::{
    AccountConstraints, ConstraintViolation, ProfileConstraints, ProjectConstraints,
    StageConstraints, TaskConstraints, TeamMemberConstraints,
};
use serde::Serialize;

const TRACING_TARGET: &str = "planline_server::error";

/// The error type for HTTP handlers in the server.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
}

impl Error<'static> {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            resource: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Sets a custom user-facing message for the error.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Sets the resource that caused the error.
    #[inline]
    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the custom message if present.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the resource if present.
    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

impl Default for Error<'static> {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("resource", &self.resource)
            .finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        let message = self.message.as_deref().unwrap_or(&response.message);

        write!(f, "{} ({}): {}", response.name, response.status, message)?;
        if let Some(ref resource) = self.resource {
            write!(f, " [resource: {}]", resource)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        let mut response = self.kind.response();

        if let Some(message) = self.message {
            response = response.with_message(message);
        }

        if let Some(resource) = self.resource {
            response = response.with_resource(resource);
        }

        response.into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// A specialized [`Result`] type for HTTP handler operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Enumeration of the HTTP error kinds the API reports.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 4xx Client Errors
    /// 400 Bad Request - Invalid request data
    BadRequest,
    /// 404 Not Found - Resource not found
    NotFound,
    /// 409 Conflict - Conflicting resource state
    Conflict,
    /// 422 Unprocessable Entity - Request is well-formed but semantically invalid
    UnprocessableEntity,

    // 5xx Server Errors
    /// 500 Internal Server Error - Unexpected server error
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Converts this error kind into a full [`Error`].
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    /// Creates an [`Error`] with the specified message.
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Creates an [`Error`] with the specified resource.
    #[inline]
    pub fn with_resource<'a>(self, resource: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_resource(resource)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the response representation of this error kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::Conflict => ErrorResponse::CONFLICT,
            Self::UnprocessableEntity => ErrorResponse::UNPROCESSABLE_ENTITY,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

/// HTTP error response representation.
///
/// Contains all the information needed to serialize an error response:
/// the error name, a user-facing message, the affected resource and the
/// HTTP status code.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier
    pub name: Cow<'a, str>,
    /// User-facing error message safe for client display
    pub message: Cow<'a, str>,
    /// The resource that the error relates to (optional, set by handler)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request could not be processed due to invalid data",
        StatusCode::BAD_REQUEST,
    );
    pub const CONFLICT: Self = Self::new(
        "conflict",
        "The request conflicts with the current state of the resource",
        StatusCode::CONFLICT,
    );
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred. Please try again later",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "The requested resource was not found",
        StatusCode::NOT_FOUND,
    );
    pub const UNPROCESSABLE_ENTITY: Self = Self::new(
        "unprocessable_entity",
        "The request is well-formed but could not be processed",
        StatusCode::UNPROCESSABLE_ENTITY,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            status,
        }
    }

    /// Replaces the default message with a custom one.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the resource this error relates to.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        self.resource = Some(resource.into());
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<AccountConstraints> for Error<'static> {
    fn from(c: AccountConstraints) -> Self {
        let error = match c {
            AccountConstraints::UsernameUnique => {
                ErrorKind::Conflict.with_message("An account with this username already exists")
            }
        };

        error.with_resource("account")
    }
}

impl From<ProfileConstraints> for Error<'static> {
    fn from(c: ProfileConstraints) -> Self {
        let error = match c {
            ProfileConstraints::AccountUnique => {
                ErrorKind::Conflict.with_message("A profile already exists for this account")
            }
        };

        error.with_resource("profile")
    }
}

impl From<TeamMemberConstraints> for Error<'static> {
    fn from(c: TeamMemberConstraints) -> Self {
        let error = match c {
            TeamMemberConstraints::ProjectAccountUnique => ErrorKind::Conflict
                .with_message("This account is already a member of the project"),
            TeamMemberConstraints::ProjectReference => ErrorKind::UnprocessableEntity
                .with_message("The referenced project does not exist"),
            TeamMemberConstraints::AccountReference => ErrorKind::UnprocessableEntity
                .with_message("The referenced account does not exist"),
        };

        error.with_resource("team_member")
    }
}

impl From<ProjectConstraints> for Error<'static> {
    fn from(c: ProjectConstraints) -> Self {
        let error = match c {
            ProjectConstraints::EndsAfterStarts => ErrorKind::UnprocessableEntity
                .with_message("The end date must not be earlier than the start date"),
        };

        error.with_resource("project")
    }
}

impl From<StageConstraints> for Error<'static> {
    fn from(c: StageConstraints) -> Self {
        let error = match c {
            StageConstraints::EndsAfterStarts => ErrorKind::UnprocessableEntity
                .with_message("The end date must not be earlier than the start date"),
        };

        error.with_resource("stage")
    }
}

impl From<TaskConstraints> for Error<'static> {
    fn from(c: TaskConstraints) -> Self {
        let error = match c {
            TaskConstraints::EndsAfterStarts => ErrorKind::UnprocessableEntity
                .with_message("The end date must not be earlier than the start date"),
        };

        error.with_resource("task")
    }
}

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::Account(c) => c.into(),
            ConstraintViolation::Profile(c) => c.into(),
            ConstraintViolation::TeamMember(c) => c.into(),
            ConstraintViolation::Project(c) => c.into(),
            ConstraintViolation::Stage(c) => c.into(),
            ConstraintViolation::Task(c) => c.into(),
        }
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        match error {
            PgError::Config(config_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %config_error,
                    "database configuration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "database timeout",
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Connection(connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Migration(migration_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %migration_error,
                    "database migration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Query(ref query_error) => {
                if let Some(constraint_name) = error.constraint()
                    && let Some(constraint) = ConstraintViolation::new(constraint_name)
                {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        constraint = constraint_name,
                        error = %query_error,
                        "query error (constraint violation)"
                    );
                    return constraint.into();
                }

                if matches!(query_error, planline_postgres::error::DieselError::NotFound) {
                    return ErrorKind::NotFound.into_error();
                }

                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "query error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::MembershipScope {
                member_id,
                project_id,
            } => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    member_id = %member_id,
                    project_id = %project_id,
                    "assignment outside the project team"
                );
                ErrorKind::UnprocessableEntity
                    .with_message(format!(
                        "Team member {member_id} is not part of project {project_id}"
                    ))
                    .with_resource("team_member")
            }
            PgError::Unexpected(unexpected_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %unexpected_error,
                    "unexpected database error"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

// Used only for transactions.
impl From<planline_postgres::error::DieselError> for Error<'static> {
    fn from(error: planline_postgres::error::DieselError) -> Self {
        let pg_error: PgError = error.into();
        pg_error.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_http_error() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        let _ = error.into_response();
    }

    #[test]
    fn error_builder_chaining() {
        let error = ErrorKind::NotFound
            .with_message("Project not found")
            .with_resource("project");

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("Project not found"));
        assert_eq!(error.resource(), Some("project"));
    }

    #[test]
    fn std_fmt_display() {
        let error = ErrorKind::NotFound
            .with_message("Project not found")
            .with_resource("project");

        let display = format!("{}", error);
        assert!(display.contains("not_found"));
        assert!(display.contains("404"));
        assert!(display.contains("Project not found"));
        assert!(display.contains("project"));
    }

    #[test]
    fn all_error_kinds_have_responses() {
        let kinds = [
            ErrorKind::BadRequest,
            ErrorKind::NotFound,
            ErrorKind::Conflict,
            ErrorKind::UnprocessableEntity,
            ErrorKind::InternalServerError,
        ];

        for kind in kinds {
            let response = kind.response();
            assert!(!response.name.is_empty());
            assert!(response.status.as_u16() >= 400);
            let _ = kind.into_response();
        }
    }

    #[test]
    fn membership_uniqueness_maps_to_conflict() {
        let violation = ConstraintViolation::new("team_members_project_id_account_id_key")
            .expect("known constraint");

        let error: Error<'static> = violation.into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.resource(), Some("team_member"));
    }

    #[test]
    fn missing_member_account_maps_to_unprocessable_entity() {
        let violation = ConstraintViolation::new("team_members_account_id_fkey")
            .expect("known constraint");

        let error: Error<'static> = violation.into();
        assert_eq!(error.kind(), ErrorKind::UnprocessableEntity);
        assert_eq!(error.resource(), Some("team_member"));
    }

    #[test]
    fn cross_project_assignment_maps_to_unprocessable_entity() {
        let error: Error<'static> = PgError::MembershipScope {
            member_id: uuid::Uuid::nil(),
            project_id: uuid::Uuid::nil(),
        }
        .into();

        assert_eq!(error.kind(), ErrorKind::UnprocessableEntity);
        assert_eq!(error.resource(), Some("team_member"));
    }

    #[test]
    fn date_order_maps_to_unprocessable_entity() {
        let violation =
            ConstraintViolation::new("stages_ends_after_starts").expect("known constraint");

        let error: Error<'static> = violation.into();
        assert_eq!(error.kind(), ErrorKind::UnprocessableEntity);
        assert_eq!(error.resource(), Some("stage"));
    }
}
