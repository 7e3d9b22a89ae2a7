//! Database migration management.
//!
//! Migrations are embedded into the binary at compile time and applied
//! with [`run_pending_migrations`] during service startup. Applying
//! migrations is blocking, so the work is moved onto a dedicated thread.

use std::time::{Duration, Instant};

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Outcome of a migration run.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    /// Versions of the migrations applied during this run, in order.
    pub applied: Vec<String>,
    /// Total wall-clock time spent applying migrations.
    pub duration: Duration,
}

impl MigrationReport {
    /// Returns the number of migrations applied during this run.
    #[inline]
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// Returns whether the schema was already up to date.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Runs all pending migrations on the database.
///
/// # Errors
///
/// Returns an error if a connection cannot be acquired or if any
/// migration fails to apply.
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<MigrationReport> {
    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        "Starting database migration process",
    );

    let start_time = Instant::now();
    let conn = pg.get_pooled_connection().await?;

    let mut conn: AsyncConnectionWrapper<_> = conn.into();
    let results = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS).map(|versions| {
            versions
                .into_iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
        })
    })
    .await;

    let duration = start_time.elapsed();
    let results = results.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            error = %err,
            "Migration task panicked, join error occurred"
        );

        PgError::Migration(err.into())
    })?;

    let applied = results.map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            error = &err,
            "Database migration process failed"
        );

        PgError::Migration(err)
    })?;

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        duration = ?duration,
        migrations_count = applied.len(),
        "Database migration process completed"
    );

    Ok(MigrationReport { applied, duration })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_noop() {
        let report = MigrationReport {
            applied: vec![],
            duration: Duration::from_millis(5),
        };
        assert!(report.is_noop());
        assert_eq!(report.applied_count(), 0);
    }

    #[test]
    fn report_counts_applied_versions() {
        let report = MigrationReport {
            applied: vec![
                "00000000000000".to_owned(),
                "2026-08-10-000001".to_owned(),
            ],
            duration: Duration::from_millis(42),
        };
        assert!(!report.is_noop());
        assert_eq!(report.applied_count(), 2);
    }
}
