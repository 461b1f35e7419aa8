//! Application settings loaded from the environment.

use crate::env::Env;
use crate::error::{ConfError, ConfResult};

/// Failure handling policy for a destructive reset operation.
///
/// The two reset operations historically disagreed on what to do with a SQL
/// failure; the difference is kept as explicit per-operation configuration
/// instead of being silently unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnResetFailure {
	/// Log the failure and re-raise it to the caller.
	#[default]
	Propagate,
	/// Log the failure and continue.
	Swallow,
}

impl OnResetFailure {
	/// Parse a policy name ("propagate" / "swallow").
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim().to_ascii_lowercase().as_str() {
			"propagate" => Some(Self::Propagate),
			"swallow" => Some(Self::Swallow),
			_ => None,
		}
	}
}

/// Connection settings for the Supabase-hosted PostgreSQL database.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
	pub user: String,
	pub password: String,
	pub host: String,
	pub port: u16,
	pub name: String,

	/// Drop and recreate the whole schema namespace before migrating.
	pub full_reset: bool,
	/// Delete all revision-history rows before migrating.
	pub history_reset: bool,

	/// Failure policy for the full schema reset.
	pub full_reset_failure: OnResetFailure,
	/// Failure policy for the revision-history reset.
	pub history_reset_failure: OnResetFailure,
}

/// Telegram bot credentials; both fields optional. Notifications are
/// disabled when the token is absent.
#[derive(Debug, Clone, Default)]
pub struct TelegramSettings {
	pub bot_token: Option<String>,
	pub chat_id: Option<String>,
}

/// Top-level settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
	pub database: DatabaseSettings,
	pub telegram: TelegramSettings,

	/// Path of the YAML seed document.
	pub seed_path: String,

	/// Bootstrap superuser created by `init_db` if missing.
	pub first_superuser: Option<String>,
	pub first_superuser_password: Option<String>,
}

impl Settings {
	/// Load settings from the process environment.
	///
	/// Destructive flags default to disabled; they are only honored when the
	/// operator sets them explicitly.
	pub fn from_env() -> ConfResult<Self> {
		let env = Env::new();

		let database = DatabaseSettings {
			user: env.str("SUPABASE_DB_USER")?,
			password: env.str("SUPABASE_DB_PASSWORD")?,
			host: env.str("SUPABASE_DB_HOST")?,
			port: parse_port(&env)?,
			name: env.str("SUPABASE_DB_NAME")?,
			full_reset: env.bool_with_default("CREWDESK_DB_FULL_RESET", false)?,
			history_reset: env.bool_with_default("CREWDESK_DB_HISTORY_RESET", false)?,
			full_reset_failure: parse_policy(
				&env,
				"CREWDESK_DB_FULL_RESET_FAILURE",
				OnResetFailure::Swallow,
			)?,
			history_reset_failure: parse_policy(
				&env,
				"CREWDESK_DB_HISTORY_RESET_FAILURE",
				OnResetFailure::Propagate,
			)?,
		};

		let telegram = TelegramSettings {
			bot_token: env.str_opt("TELEGRAM_BOT_TOKEN"),
			chat_id: env.str_opt("TELEGRAM_CHAT_ID"),
		};

		Ok(Self {
			database,
			telegram,
			seed_path: env.str_with_default("CREWDESK_SEED_PATH", Some("seeds/seed.yaml"))?,
			first_superuser: env.str_opt("FIRST_SUPERUSER"),
			first_superuser_password: env.str_opt("FIRST_SUPERUSER_PASSWORD"),
		})
	}
}

fn parse_port(env: &Env) -> ConfResult<u16> {
	let port = env.int_with_default("SUPABASE_DB_PORT", 5432)?;
	u16::try_from(port).map_err(|_| ConfError::ParseError {
		key: "SUPABASE_DB_PORT".to_string(),
		message: format!("{} is out of range for a port", port),
	})
}

fn parse_policy(env: &Env, key: &str, default: OnResetFailure) -> ConfResult<OnResetFailure> {
	match env.str_opt(key) {
		Some(value) => OnResetFailure::parse(&value).ok_or_else(|| ConfError::ParseError {
			key: key.to_string(),
			message: format!("'{}' is not a reset failure policy", value),
		}),
		None => Ok(default),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;
	use std::env;

	fn set_required_vars() {
		unsafe {
			env::set_var("SUPABASE_DB_USER", "postgres");
			env::set_var("SUPABASE_DB_PASSWORD", "secret");
			env::set_var("SUPABASE_DB_HOST", "db.example.supabase.co");
			env::set_var("SUPABASE_DB_NAME", "postgres");
		}
	}

	fn clear_optional_vars() {
		unsafe {
			env::remove_var("SUPABASE_DB_PORT");
			env::remove_var("CREWDESK_DB_FULL_RESET");
			env::remove_var("CREWDESK_DB_HISTORY_RESET");
			env::remove_var("CREWDESK_DB_FULL_RESET_FAILURE");
			env::remove_var("CREWDESK_DB_HISTORY_RESET_FAILURE");
			env::remove_var("CREWDESK_SEED_PATH");
		}
	}

	#[rstest]
	#[serial]
	fn test_destructive_flags_default_disabled() {
		set_required_vars();
		clear_optional_vars();

		let settings = Settings::from_env().unwrap();
		assert!(!settings.database.full_reset);
		assert!(!settings.database.history_reset);
	}

	#[rstest]
	#[serial]
	fn test_reset_failure_policies_default_asymmetric() {
		set_required_vars();
		clear_optional_vars();

		let settings = Settings::from_env().unwrap();
		assert_eq!(
			settings.database.full_reset_failure,
			OnResetFailure::Swallow
		);
		assert_eq!(
			settings.database.history_reset_failure,
			OnResetFailure::Propagate
		);
	}

	#[rstest]
	#[serial]
	fn test_flags_enabled_from_env() {
		set_required_vars();
		clear_optional_vars();
		unsafe { env::set_var("CREWDESK_DB_FULL_RESET", "1") };

		let settings = Settings::from_env().unwrap();
		assert!(settings.database.full_reset);

		unsafe { env::remove_var("CREWDESK_DB_FULL_RESET") };
	}

	#[rstest]
	#[serial]
	fn test_port_default_and_override() {
		set_required_vars();
		clear_optional_vars();

		let settings = Settings::from_env().unwrap();
		assert_eq!(settings.database.port, 5432);

		unsafe { env::set_var("SUPABASE_DB_PORT", "6543") };
		let settings = Settings::from_env().unwrap();
		assert_eq!(settings.database.port, 6543);
		unsafe { env::remove_var("SUPABASE_DB_PORT") };
	}

	#[rstest]
	#[case("propagate", Some(OnResetFailure::Propagate))]
	#[case("Swallow", Some(OnResetFailure::Swallow))]
	#[case("ignore", None)]
	fn test_policy_parse(#[case] input: &str, #[case] expected: Option<OnResetFailure>) {
		assert_eq!(OnResetFailure::parse(input), expected);
	}
}
