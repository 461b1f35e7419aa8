//! Error types for configuration loading.

use thiserror::Error;

/// Errors that can occur while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfError {
	/// A required environment variable is not set.
	#[error("Missing environment variable: {0}")]
	MissingVariable(String),

	/// A variable is set but its value cannot be parsed as the expected type.
	#[error("Cannot parse {key}: {message}")]
	ParseError {
		/// Variable name that failed to parse.
		key: String,
		/// Parse error message.
		message: String,
	},
}

/// Result type alias for configuration operations.
pub type ConfResult<T> = Result<T, ConfError>;
