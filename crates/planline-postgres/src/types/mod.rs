//! Contains constraints, enumerations and other custom types.

mod constraint;
mod enums;
mod progress;

pub use constraint::{
    AccountConstraints, ConstraintCategory, ConstraintViolation, ProfileConstraints,
    ProjectConstraints, StageConstraints, TaskConstraints, TeamMemberConstraints,
};
pub use enums::{ArtifactKind, WorkStatus};
pub use progress::completion_percentage;
