//! Error types and utilities for database operations.
//!
//! This module provides error handling for all database operations,
//! including connection errors, query errors, migration errors and timeout
//! errors. Constraint violations can be recovered in typed form through
//! [`PgError::constraint_violation`].

use std::borrow::Cow;

use deadpool::managed::TimeoutType;
use diesel::result::{ConnectionError, Error};
use diesel_async::pooled_connection::PoolError as DieselPoolError;
use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;

use crate::types::ConstraintViolation;

pub use deadpool::managed::TimeoutType as PoolTimeoutType;
pub use diesel::result::{ConnectionError as DieselConnectionError, Error as DieselError};

/// Type-erased error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for all PostgreSQL database operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    /// Configuration error.
    ///
    /// Invalid configuration parameters, missing required settings, or
    /// other issues related to the database configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database operation timed out.
    ///
    /// This can occur during connection creation, waiting for available
    /// connections, or connection recycling.
    #[error("Database operation timed out")]
    Timeout(TimeoutType),

    /// Failed to establish or maintain a database connection.
    #[error("Database connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Database migration operation failed.
    #[error("Database migration error: {0}")]
    Migration(BoxError),

    /// Database query execution failed.
    ///
    /// SQL errors, constraint violations, type mismatches and other
    /// query-related failures.
    #[error("Database query error: {0}")]
    Query(#[from] Error),

    /// An assignment crossed project boundaries.
    ///
    /// Stage responsibles and task assignees must reference a membership
    /// of the record's own project. A membership that is missing or that
    /// belongs to another project is rejected before the write.
    #[error("Membership {member_id} is not part of project {project_id}")]
    MembershipScope {
        /// The membership that was referenced.
        member_id: uuid::Uuid,
        /// The project owning the stage or task.
        project_id: uuid::Uuid,
    },

    /// Unexpected error occurred.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl PgError {
    /// Extracts the constraint name from a constraint violation error.
    ///
    /// # Returns
    ///
    /// - `Some(constraint_name)` if this error represents a constraint violation
    /// - `None` if this error is not related to a constraint violation
    pub fn constraint(&self) -> Option<&str> {
        let PgError::Query(err) = self else {
            return None;
        };

        let Error::DatabaseError(_, err) = err else {
            return None;
        };

        err.constraint_name()
    }

    /// Returns a structured constraint violation if this error represents one.
    ///
    /// Known violations (say, the one-role-per-project uniqueness rule)
    /// come back as a typed [`ConstraintViolation`] instead of a string.
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        self.constraint().and_then(ConstraintViolation::new)
    }

    /// Returns whether the underlying query found no rows.
    ///
    /// Update/delete paths that expect an existing row report a missing
    /// one through this variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PgError::Query(Error::NotFound))
    }

    /// Returns whether this error indicates a transient failure that might
    /// succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PgError::Timeout(_) | PgError::Connection(ConnectionError::BadConnection(_))
        )
    }

    /// Returns whether this error indicates a permanent failure that won't
    /// succeed on retry.
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }
}

impl From<DeadpoolError> for PgError {
    fn from(value: DeadpoolError) -> Self {
        match value {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            DeadpoolError::PostCreateHook(err) => {
                // This should not happen with our current hooks, but handle gracefully:
                tracing::warn!("Unexpected post-create hook error: {}", err);
                Self::Unexpected(err.to_string().into())
            }
            DeadpoolError::NoRuntimeSpecified => {
                // This should not happen as we specify tokio runtime, but handle gracefully:
                tracing::error!("No tokio runtime specified for connection pool");
                Self::Unexpected("No runtime specified".into())
            }
            DeadpoolError::Closed => {
                // Pool was closed, treat as connection error:
                Self::Connection(ConnectionError::InvalidConnectionUrl(
                    "Connection pool is closed".into(),
                ))
            }
        }
    }
}

/// Specialized [`Result`] type for database operations.
pub type PgResult<T, E = PgError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConstraintViolation, TeamMemberConstraints};

    struct UniqueViolationInfo {
        constraint: String,
    }

    impl diesel::result::DatabaseErrorInformation for UniqueViolationInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(&self.constraint)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: &str) -> PgError {
        PgError::Query(Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new(UniqueViolationInfo {
                constraint: constraint.to_owned(),
            }),
        ))
    }

    #[test]
    fn membership_uniqueness_surfaces_typed() {
        let err = unique_violation("team_members_project_id_account_id_key");
        assert_eq!(
            err.constraint_violation(),
            Some(ConstraintViolation::TeamMember(
                TeamMemberConstraints::ProjectAccountUnique
            ))
        );
    }

    #[test]
    fn unknown_constraints_stay_untyped() {
        let err = unique_violation("some_other_table_pkey");
        assert_eq!(err.constraint(), Some("some_other_table_pkey"));
        assert_eq!(err.constraint_violation(), None);
    }

    #[test]
    fn not_found_is_detected() {
        let err = PgError::Query(Error::NotFound);
        assert!(err.is_not_found());
        assert!(err.is_permanent());
    }

    #[test]
    fn membership_scope_is_permanent_and_untyped() {
        let err = PgError::MembershipScope {
            member_id: uuid::Uuid::nil(),
            project_id: uuid::Uuid::nil(),
        };
        assert!(err.is_permanent());
        assert_eq!(err.constraint(), None);
        assert_eq!(err.constraint_violation(), None);
    }
}
