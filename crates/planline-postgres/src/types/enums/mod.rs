//! Database enumeration types for type-safe queries.
//!
//! Each enumeration corresponds to a PostgreSQL ENUM type defined in the
//! schema and provides serialization support for APIs and database
//! integration through Diesel.

pub mod artifact_kind;
pub mod work_status;

pub use artifact_kind::ArtifactKind;
pub use work_status::WorkStatus;
