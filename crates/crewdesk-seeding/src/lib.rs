//! Dependency-ordered database seeding.
//!
//! A seed document groups named collections of records; record fields are
//! either literals or references of the form `${collection[index].field}`
//! naming an earlier record by position. Collections are inserted in an
//! order consistent with the foreign-key dependencies between model
//! descriptors; within a collection, records insert in declared order so
//! later records may reference earlier ones.
//!
//! Reseeding is idempotent: a record whose uniqueness constraint already
//! matches a row is skipped, not duplicated.

pub mod autoseeder;
pub mod document;
pub mod error;
pub mod generator;
pub mod graph;
pub mod params;
pub mod reference;
pub mod registry;
pub mod seeder;

pub use autoseeder::AutoSeeder;
pub use document::{SeedDocument, SeedRecord, SeedValue};
pub use error::{SeedingError, SeedingResult};
pub use graph::DependencyGraph;
pub use reference::SeedRef;
pub use registry::SeededRegistry;
pub use seeder::{SeedReport, Seeder};
