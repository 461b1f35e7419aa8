//! Management commands for the crewdesk backend.
//!
//! The `manage` binary dispatches one of: `makemigration`, `migrate`,
//! `seed`, or `bootstrap` (all three in sequence). Every command reports
//! success or failure through the process exit code.

pub mod cli;
pub mod execute;

pub use cli::{Cli, Commands};
pub use execute::execute;
