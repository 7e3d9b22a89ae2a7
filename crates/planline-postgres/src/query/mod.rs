//! Database query repositories for all entities in the system.
//!
//! This module contains repository implementations that provide high-level
//! database operations for all entities, encapsulating common patterns and
//! providing type-safe interfaces. Each trait is implemented directly on
//! the async connection, so a pooled connection is all a caller needs.
//!
//! # Pagination
//!
//! All queries that may return large result sets use the [`Pagination`]
//! struct to provide consistent, bounded pagination across the system.

pub mod account;
pub mod artifact;
pub mod contact;
pub mod profile;
pub mod project;
pub mod stage;
pub mod task;
pub mod team_member;

use serde::{Deserialize, Serialize};

pub use account::AccountRepository;
pub use artifact::ArtifactRepository;
pub use contact::ContactRepository;
pub use profile::ProfileRepository;
pub use project::{ProjectOverview, ProjectRepository};
pub use stage::{StageOverview, StageRepository};
pub use task::TaskRepository;
pub use team_member::TeamMemberRepository;

/// Pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl Pagination {
    /// Creates a new pagination instance.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            // Ensure limit is between 1 and 1000
            limit: limit.clamp(1, 1000),
            // Ensure offset is non-negative
            offset: offset.max(0),
        }
    }

    /// Creates pagination from page number and page size.
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, 1000);
        Self::new(page_size, page.saturating_sub(1).saturating_mul(page_size))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_limit_and_offset() {
        let p = Pagination::new(0, -5);
        assert_eq!(p.limit, 1);
        assert_eq!(p.offset, 0);

        let p = Pagination::new(10_000, 3);
        assert_eq!(p.limit, 1000);
        assert_eq!(p.offset, 3);
    }

    #[test]
    fn page_arithmetic() {
        let p = Pagination::from_page(1, 25);
        assert_eq!((p.limit, p.offset), (25, 0));

        let p = Pagination::from_page(3, 25);
        assert_eq!((p.limit, p.offset), (25, 50));

        // Page numbers below one behave like the first page.
        let p = Pagination::from_page(0, 25);
        assert_eq!((p.limit, p.offset), (25, 0));
    }

    #[test]
    fn extreme_page_numbers_saturate_instead_of_overflowing() {
        let p = Pagination::from_page(i64::MAX, 1000);
        assert_eq!(p.limit, 1000);
        assert_eq!(p.offset, i64::MAX);
    }
}
