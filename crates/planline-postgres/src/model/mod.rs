//! Typed models for every table in the schema.
//!
//! Each table contributes three structs: the queryable row, an `Insertable`
//! `New*` payload and an `AsChangeset` `Update*` payload where partial
//! updates apply only the `Some` fields.

pub mod account;
pub mod artifact;
pub mod contact;
pub mod profile;
pub mod project;
pub mod stage;
pub mod task;
pub mod team_member;

pub use account::{Account, NewAccount, UpdateAccount};
pub use artifact::{Artifact, AttachmentTarget, NewArtifact, UpdateArtifact};
pub use contact::{Contact, NewContact, UpdateContact};
pub use profile::{NewProfile, Profile, UpdateProfile};
pub use project::{NewProject, Project, UpdateProject};
pub use stage::{NewStage, Stage, UpdateStage};
pub use task::{NewTask, Task, UpdateTask};
pub use team_member::{NewTeamMember, TeamMember, UpdateTeamMember};
