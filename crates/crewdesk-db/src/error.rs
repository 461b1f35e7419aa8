//! Error types for the connection and CRUD layers.

use thiserror::Error;

/// Errors from connection handling and row-level operations.
#[derive(Debug, Error)]
pub enum DbError {
	/// Underlying SQL error.
	#[error("Database error: {0}")]
	Sql(#[from] sqlx::Error),

	/// Password hashing failed.
	#[error("Password hash error: {0}")]
	PasswordHash(String),
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;
