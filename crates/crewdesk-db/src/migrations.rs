//! First-party schema migrations.
//!
//! Migrations are an embedded linear chain ([`builtin`]); the database
//! records which chain entry it is at in a single-column revision table
//! ([`recorder`]). Before anything is applied, the [`reconciler`] inspects
//! the recorded revision state and remediates anomalies; the [`runner`]
//! then applies whatever is pending.

use thiserror::Error;

pub mod builtin;
pub mod migration;
pub mod recorder;
pub mod reconciler;
pub mod runner;
pub mod scaffold;
pub mod state;

pub use migration::Migration;
pub use recorder::RevisionRecorder;
pub use reconciler::{ReconcilePlan, Reconciler};
pub use runner::{MigrationReport, MigrationRunner};
pub use scaffold::create_migration;
pub use state::RevisionState;

/// Errors from the migration subsystem.
#[derive(Debug, Error)]
pub enum MigrationError {
	/// Underlying SQL error.
	#[error("SQL error: {0}")]
	Sql(#[from] sqlx::Error),

	/// The recorded head revision is not part of the migration chain.
	#[error("Unknown revision recorded in database: {0}")]
	UnknownRevision(String),

	/// The revision history holds more than one head and has not been
	/// reconciled.
	#[error("Divergent revision history: {0:?}")]
	Divergence(Vec<String>),

	/// A destructive reset operation failed.
	#[error("Destructive operation '{operation}' failed: {source}")]
	DestructiveOperation {
		/// Name of the reset operation that failed.
		operation: &'static str,
		/// Underlying SQL error.
		#[source]
		source: sqlx::Error,
	},

	/// Scaffolding a migration file failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// A migration message produced an empty or invalid file name.
	#[error("Invalid migration name: {0}")]
	InvalidName(String),
}

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, MigrationError>;
