//! Typed environment variable access.
//!
//! Provides a small prefix-aware reader over `std::env` so every lookup
//! goes through one code path with consistent parse errors.

use std::env;

use crate::error::{ConfError, ConfResult};

/// Environment variable reader with optional prefix support.
#[derive(Debug, Clone, Default)]
pub struct Env {
	/// Optional prefix for environment variables (e.g., "CREWDESK_").
	pub prefix: Option<String>,
}

impl Env {
	/// Create a new reader without a prefix.
	pub fn new() -> Self {
		Self { prefix: None }
	}

	/// Set a prefix for all environment variable lookups.
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	/// Get the full key name with prefix.
	fn key_name(&self, key: &str) -> String {
		match &self.prefix {
			Some(prefix) => format!("{}{}", prefix, key),
			None => key.to_string(),
		}
	}

	/// Read a string value from the environment.
	pub fn str(&self, key: &str) -> ConfResult<String> {
		self.str_with_default(key, None)
	}

	/// Read a string value with a default.
	pub fn str_with_default(&self, key: &str, default: Option<&str>) -> ConfResult<String> {
		let full_key = self.key_name(key);
		match env::var(&full_key) {
			Ok(val) => Ok(val),
			Err(_) => match default {
				Some(d) => Ok(d.to_string()),
				None => Err(ConfError::MissingVariable(full_key)),
			},
		}
	}

	/// Read an optional string value; unset resolves to `None`.
	pub fn str_opt(&self, key: &str) -> Option<String> {
		env::var(self.key_name(key)).ok()
	}

	/// Read a boolean value with a default.
	pub fn bool_with_default(&self, key: &str, default: bool) -> ConfResult<bool> {
		let full_key = self.key_name(key);
		match env::var(&full_key) {
			Ok(val) => parse_bool(&val).ok_or_else(|| ConfError::ParseError {
				key: full_key,
				message: format!("'{}' is not a boolean", val),
			}),
			Err(_) => Ok(default),
		}
	}

	/// Read an integer value with a default.
	pub fn int_with_default(&self, key: &str, default: i64) -> ConfResult<i64> {
		let full_key = self.key_name(key);
		match env::var(&full_key) {
			Ok(val) => val.parse::<i64>().map_err(|e| ConfError::ParseError {
				key: full_key,
				message: e.to_string(),
			}),
			Err(_) => Ok(default),
		}
	}
}

/// Parse a boolean from common truthy/falsy spellings.
pub fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" | "" => Some(false),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	#[case("1", Some(true))]
	#[case("true", Some(true))]
	#[case("YES", Some(true))]
	#[case("on", Some(true))]
	#[case("0", Some(false))]
	#[case("false", Some(false))]
	#[case("off", Some(false))]
	#[case("maybe", None)]
	fn test_parse_bool(#[case] input: &str, #[case] expected: Option<bool>) {
		assert_eq!(parse_bool(input), expected);
	}

	#[rstest]
	#[serial]
	fn test_str_with_default() {
		unsafe { env::remove_var("CREWDESK_TEST_UNSET") };
		let env = Env::new();
		let value = env
			.str_with_default("CREWDESK_TEST_UNSET", Some("fallback"))
			.unwrap();
		assert_eq!(value, "fallback");
	}

	#[rstest]
	#[serial]
	fn test_missing_variable() {
		unsafe { env::remove_var("CREWDESK_TEST_UNSET") };
		let env = Env::new();
		let result = env.str("CREWDESK_TEST_UNSET");
		assert!(matches!(result, Err(ConfError::MissingVariable(_))));
	}

	#[rstest]
	#[serial]
	fn test_prefix_lookup() {
		unsafe { env::set_var("CREWDESK_TEST_PREFIXED", "value") };
		let env = Env::new().with_prefix("CREWDESK_");
		assert_eq!(env.str("TEST_PREFIXED").unwrap(), "value");
		unsafe { env::remove_var("CREWDESK_TEST_PREFIXED") };
	}

	#[rstest]
	#[serial]
	fn test_bool_with_default() {
		unsafe { env::set_var("CREWDESK_TEST_BOOL", "yes") };
		let env = Env::new();
		assert!(env.bool_with_default("CREWDESK_TEST_BOOL", false).unwrap());
		unsafe { env::remove_var("CREWDESK_TEST_BOOL") };
		assert!(!env.bool_with_default("CREWDESK_TEST_BOOL", false).unwrap());
	}
}
