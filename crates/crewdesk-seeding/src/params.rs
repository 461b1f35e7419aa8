//! Conversion of resolved seed values into typed bind parameters.
//!
//! Every parameter is keyed off the field's declared [`FieldKind`]; a value
//! that does not fit its kind is an invalid-value error, not a coercion.

use chrono::{DateTime, Utc};
use sqlx::Arguments;
use sqlx::postgres::PgArguments;
use uuid::Uuid;

use crewdesk_models::{FieldDescriptor, FieldKind};

use crate::error::{SeedingError, SeedingResult};

/// A typed bind parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
	Str(String),
	Int(i64),
	Float(f64),
	Bool(bool),
	Timestamp(DateTime<Utc>),
	Id(Uuid),
}

impl ParamValue {
	/// Convert a resolved JSON value according to the field's kind.
	pub fn from_json(field: &FieldDescriptor, value: &serde_json::Value) -> SeedingResult<Self> {
		let mismatch = |expected: &str| SeedingError::InvalidValue {
			field: field.name.to_string(),
			message: format!("expected {}, got {}", expected, value),
		};

		match field.kind {
			FieldKind::Str => value
				.as_str()
				.map(|s| Self::Str(s.to_string()))
				.ok_or_else(|| mismatch("a string")),
			FieldKind::Int => value.as_i64().map(Self::Int).ok_or_else(|| mismatch("an integer")),
			FieldKind::Float => value
				.as_f64()
				.map(Self::Float)
				.ok_or_else(|| mismatch("a number")),
			FieldKind::Bool => value
				.as_bool()
				.map(Self::Bool)
				.ok_or_else(|| mismatch("a boolean")),
			FieldKind::Timestamp => {
				let text = value.as_str().ok_or_else(|| mismatch("an RFC 3339 timestamp"))?;
				let parsed = DateTime::parse_from_rfc3339(text)
					.map_err(|_| mismatch("an RFC 3339 timestamp"))?;
				Ok(Self::Timestamp(parsed.with_timezone(&Utc)))
			}
			FieldKind::Id | FieldKind::ForeignRef(_) => {
				let text = value.as_str().ok_or_else(|| mismatch("a UUID"))?;
				let parsed = Uuid::parse_str(text).map_err(|_| mismatch("a UUID"))?;
				Ok(Self::Id(parsed))
			}
		}
	}

	/// Append this parameter to a set of Postgres bind arguments.
	pub fn add_to(&self, arguments: &mut PgArguments) -> SeedingResult<()> {
		let result = match self {
			Self::Str(s) => arguments.add(s.clone()),
			Self::Int(i) => arguments.add(*i),
			Self::Float(f) => arguments.add(*f),
			Self::Bool(b) => arguments.add(*b),
			Self::Timestamp(t) => arguments.add(*t),
			Self::Id(u) => arguments.add(*u),
		};
		result.map_err(|e| SeedingError::InvalidValue {
			field: String::new(),
			message: format!("could not encode parameter: {}", e),
		})
	}
}

/// Build the bind arguments for a parameter list.
pub fn build_arguments(params: &[ParamValue]) -> SeedingResult<PgArguments> {
	let mut arguments = PgArguments::default();
	for param in params {
		param.add_to(&mut arguments)?;
	}
	Ok(arguments)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	const STR_FIELD: FieldDescriptor = FieldDescriptor::new("email", FieldKind::Str, true);
	const INT_FIELD: FieldDescriptor = FieldDescriptor::new("level", FieldKind::Int, true);
	const TS_FIELD: FieldDescriptor =
		FieldDescriptor::new("due_date", FieldKind::Timestamp, false);
	const REF_FIELD: FieldDescriptor =
		FieldDescriptor::new("role_id", FieldKind::ForeignRef("roles"), false);

	#[rstest]
	fn test_string_conversion() {
		let param = ParamValue::from_json(&STR_FIELD, &json!("a@b.com")).unwrap();
		assert_eq!(param, ParamValue::Str("a@b.com".to_string()));
	}

	#[rstest]
	fn test_kind_mismatch_is_invalid_value() {
		let result = ParamValue::from_json(&INT_FIELD, &json!("three"));
		assert!(matches!(
			result,
			Err(SeedingError::InvalidValue { field, .. }) if field == "level"
		));
	}

	#[rstest]
	fn test_timestamp_parsing() {
		let param =
			ParamValue::from_json(&TS_FIELD, &json!("2026-01-15T09:30:00Z")).unwrap();
		let ParamValue::Timestamp(ts) = param else {
			panic!("expected a timestamp");
		};
		assert_eq!(ts.to_rfc3339(), "2026-01-15T09:30:00+00:00");
	}

	#[rstest]
	fn test_malformed_timestamp_rejected() {
		assert!(ParamValue::from_json(&TS_FIELD, &json!("yesterday")).is_err());
	}

	#[rstest]
	fn test_foreign_ref_parses_uuid() {
		let id = uuid::Uuid::new_v4();
		let param = ParamValue::from_json(&REF_FIELD, &json!(id.to_string())).unwrap();
		assert_eq!(param, ParamValue::Id(id));
	}

	#[rstest]
	fn test_foreign_ref_rejects_non_uuid() {
		assert!(ParamValue::from_json(&REF_FIELD, &json!("not-a-uuid")).is_err());
	}

	#[rstest]
	fn test_build_arguments_accepts_mixed_params() {
		let params = vec![
			ParamValue::Str("x".to_string()),
			ParamValue::Int(7),
			ParamValue::Bool(true),
			ParamValue::Id(uuid::Uuid::new_v4()),
		];
		assert!(build_arguments(&params).is_ok());
	}
}
