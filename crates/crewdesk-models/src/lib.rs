//! Model descriptors and domain row types for the crewdesk backend.
//!
//! The descriptor layer ([`descriptor`], [`registry`]) is the metadata the
//! seeding and migration machinery works from: field names, semantic field
//! kinds, foreign references and uniqueness constraints. Descriptors are
//! immutable once declared; declaration order in [`registry::registry`] is
//! the tie-break order for dependency-ordered seeding.
//!
//! The row modules hold the sqlx-mapped structs for the actual tables.

pub mod descriptor;
pub mod hierarchy;
pub mod organisation;
pub mod registry;
pub mod role;
pub mod task;
pub mod user;

pub use descriptor::{FieldDescriptor, FieldKind, ModelDescriptor};
pub use hierarchy::HierarchyRelationship;
pub use organisation::{Department, Employee, Organisation};
pub use registry::{descriptor_for, registry};
pub use role::Role;
pub use task::{Task, TaskPriority, TaskStatus};
pub use user::User;
