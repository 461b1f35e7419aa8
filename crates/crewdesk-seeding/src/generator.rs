//! Seed-value generation for the auto-seeder.
//!
//! Values are produced per [`FieldKind`]; field names only steer the shape
//! of generated text (emails, domains, descriptions). Identifier and
//! foreign-reference kinds are never generated here: ids come from the
//! database and references are wired up by the auto-seeder.

use fake::Fake;
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::LastName;
use rand::Rng;

use crewdesk_models::FieldKind;

/// Fixed argon2 hash used for every generated password field, so seeded
/// accounts share a known test credential.
pub const TEST_PASSWORD_HASH: &str =
	"$argon2id$v=19$m=19456,t=2,p=1$c2VlZGVkLXNhbHQ$1GhpbCtJYXop2fp9WP9pGXFKS0mn7e29fbGXl/jwVDo";

/// Generate a value for one field.
///
/// `label` identifies the record being generated (model name plus ordinal)
/// and is woven into text values the way hand-written test data would be.
/// Returns `Null` for kinds that cannot be generated.
pub fn generate(kind: FieldKind, field_name: &str, label: &str) -> serde_json::Value {
	let mut rng = rand::thread_rng();
	let lowered = field_name.to_ascii_lowercase();

	match kind {
		FieldKind::Str => serde_json::Value::String(generate_string(&lowered, label)),
		FieldKind::Int => {
			let value = if lowered.contains("level") {
				rng.gen_range(1..=5)
			} else {
				rng.gen_range(1..=100)
			};
			serde_json::Value::from(value)
		}
		FieldKind::Float => {
			let value: f64 = rng.gen_range(0.0..100.0);
			serde_json::Value::from((value * 100.0).round() / 100.0)
		}
		FieldKind::Bool => serde_json::Value::Bool(rng.gen_bool(0.5)),
		FieldKind::Timestamp => {
			serde_json::Value::String(chrono::Utc::now().to_rfc3339())
		}
		FieldKind::Id | FieldKind::ForeignRef(_) => serde_json::Value::Null,
	}
}

fn generate_string(field_name: &str, label: &str) -> String {
	// Status and priority are constrained text columns; anything random
	// would violate their CHECK constraints.
	if field_name == "status" {
		return "todo".to_string();
	}
	if field_name == "priority" {
		return "medium".to_string();
	}

	if field_name.contains("email") {
		let username: String = Username().fake();
		format!("test_{}_{}@example.com", label.to_lowercase(), username)
	} else if field_name.contains("password") {
		TEST_PASSWORD_HASH.to_string()
	} else if field_name.contains("domain") {
		let word: String = Word().fake();
		format!("test-{}-{}.example.com", label.to_lowercase(), word)
	} else if field_name.contains("description") {
		let text: String = Sentence(4..9).fake();
		format!("Test description for {}: {}", label, text)
	} else if field_name.contains("name") {
		let surname: String = LastName().fake();
		format!("Test {} {}", label, surname)
	} else {
		let word: String = Word().fake();
		format!("Test_{}_{}", label, word)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_email_shape() {
		let value = generate(FieldKind::Str, "email", "User_1");
		let text = value.as_str().unwrap();
		assert!(text.starts_with("test_user_1_"));
		assert!(text.ends_with("@example.com"));
	}

	#[rstest]
	fn test_password_uses_fixed_hash() {
		let value = generate(FieldKind::Str, "hashed_password", "User_1");
		assert_eq!(value.as_str().unwrap(), TEST_PASSWORD_HASH);
	}

	#[rstest]
	fn test_status_and_priority_respect_check_constraints() {
		assert_eq!(generate(FieldKind::Str, "status", "Task_1"), "todo");
		assert_eq!(generate(FieldKind::Str, "priority", "Task_1"), "medium");
	}

	#[rstest]
	fn test_level_stays_in_range() {
		for _ in 0..50 {
			let value = generate(FieldKind::Int, "level", "Employee_1");
			let level = value.as_i64().unwrap();
			assert!((1..=5).contains(&level));
		}
	}

	#[rstest]
	fn test_timestamp_is_rfc3339() {
		let value = generate(FieldKind::Timestamp, "due_date", "Task_1");
		assert!(chrono::DateTime::parse_from_rfc3339(value.as_str().unwrap()).is_ok());
	}

	#[rstest]
	fn test_reference_kinds_are_not_generated() {
		assert!(generate(FieldKind::Id, "id", "Role_1").is_null());
		assert!(generate(FieldKind::ForeignRef("roles"), "role_id", "User_1").is_null());
	}
}
