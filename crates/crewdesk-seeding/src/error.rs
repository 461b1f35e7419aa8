//! Error types for the seeding module.

use thiserror::Error;

/// Errors that can occur during seeding operations.
#[derive(Debug, Error)]
pub enum SeedingError {
	/// The model dependency graph is unusable (cycle, unknown collection).
	/// Raised before any row is inserted.
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// A seed reference names a record that has not been seeded.
	#[error("Reference error: {0}")]
	Reference(String),

	/// A reference expression or document shape could not be parsed.
	#[error("Parse error: {0}")]
	Parse(String),

	/// A field value does not fit its declared kind.
	#[error("Invalid value for {field}: {message}")]
	InvalidValue {
		/// Field the value was supplied for.
		field: String,
		/// What was wrong with it.
		message: String,
	},

	/// YAML parsing failed.
	#[error("YAML error: {0}")]
	Yaml(#[from] serde_yaml::Error),

	/// Database operation failed.
	#[error("Database error: {0}")]
	Database(#[from] sqlx::Error),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type alias for seeding operations.
pub type SeedingResult<T> = Result<T, SeedingError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_configuration_error_display() {
		let error = SeedingError::Configuration("cycle: a -> b -> a".to_string());
		assert_eq!(error.to_string(), "Configuration error: cycle: a -> b -> a");
	}

	#[rstest]
	fn test_invalid_value_display() {
		let error = SeedingError::InvalidValue {
			field: "level".to_string(),
			message: "expected an integer".to_string(),
		};
		assert_eq!(
			error.to_string(),
			"Invalid value for level: expected an integer"
		);
	}
}
