//! Seed documents.
//!
//! A document maps collection names to ordered lists of records; each
//! record maps field names to values. Values are a tagged variant, either
//! a literal or a parsed reference; ad hoc string slicing never leaves
//! this module's parse step.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{SeedingError, SeedingResult};
use crate::reference::{SeedRef, looks_like_reference, parse_reference};

/// A single field value in a seed record.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedValue {
	/// A plain value, inserted as-is.
	Literal(serde_json::Value),
	/// A deferred reference to an earlier record's field.
	Reference(SeedRef),
}

impl SeedValue {
	/// Interpret a YAML scalar/compound as a seed value.
	///
	/// Strings starting with `${` must parse as reference expressions.
	pub fn from_yaml(value: serde_yaml::Value) -> SeedingResult<Self> {
		if let serde_yaml::Value::String(s) = &value {
			if looks_like_reference(s) {
				return Ok(Self::Reference(parse_reference(s)?));
			}
		}
		let literal = serde_json::to_value(&value)
			.map_err(|e| SeedingError::Parse(format!("unrepresentable YAML value: {}", e)))?;
		Ok(Self::Literal(literal))
	}

	/// Render back to the YAML form used in documents.
	fn to_yaml(&self) -> serde_yaml::Value {
		match self {
			Self::Literal(value) => serde_yaml::to_value(value)
				.unwrap_or(serde_yaml::Value::Null),
			Self::Reference(reference) => serde_yaml::Value::String(reference.to_string()),
		}
	}
}

/// One record: field name to value, in declared order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedRecord {
	pub fields: IndexMap<String, SeedValue>,
}

impl SeedRecord {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert a field, keeping declaration order.
	pub fn set(&mut self, name: impl Into<String>, value: SeedValue) {
		self.fields.insert(name.into(), value);
	}
}

/// A parsed seed document: collection name → ordered records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedDocument {
	pub collections: IndexMap<String, Vec<SeedRecord>>,
}

impl SeedDocument {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse a document from YAML text.
	pub fn from_yaml_str(content: &str) -> SeedingResult<Self> {
		let value: serde_yaml::Value = serde_yaml::from_str(content)?;
		let serde_yaml::Value::Mapping(mapping) = value else {
			return Err(SeedingError::Parse(
				"seed document root must be a mapping of collections".to_string(),
			));
		};

		let mut collections = IndexMap::new();
		for (key, entry) in mapping {
			let serde_yaml::Value::String(name) = key else {
				return Err(SeedingError::Parse(
					"collection names must be strings".to_string(),
				));
			};
			let serde_yaml::Value::Sequence(items) = entry else {
				return Err(SeedingError::Parse(format!(
					"collection '{}' must be a sequence of records",
					name
				)));
			};

			let mut records = Vec::with_capacity(items.len());
			for (position, item) in items.into_iter().enumerate() {
				let serde_yaml::Value::Mapping(fields) = item else {
					return Err(SeedingError::Parse(format!(
						"record {}[{}] must be a mapping",
						name, position
					)));
				};
				let mut record = SeedRecord::new();
				for (field_key, field_value) in fields {
					let serde_yaml::Value::String(field_name) = field_key else {
						return Err(SeedingError::Parse(format!(
							"field names in {}[{}] must be strings",
							name, position
						)));
					};
					record.set(field_name, SeedValue::from_yaml(field_value)?);
				}
				records.push(record);
			}
			collections.insert(name, records);
		}

		Ok(Self { collections })
	}

	/// Load a document from a YAML file.
	pub fn from_path(path: &Path) -> SeedingResult<Self> {
		let content = fs::read_to_string(path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				SeedingError::Parse(format!("seed document not found: {}", path.display()))
			} else {
				SeedingError::Io(e)
			}
		})?;
		Self::from_yaml_str(&content)
	}

	/// Serialize back to YAML, references in `${...}` form.
	pub fn to_yaml(&self) -> SeedingResult<String> {
		let mut root = serde_yaml::Mapping::new();
		for (name, records) in &self.collections {
			let mut items = Vec::with_capacity(records.len());
			for record in records {
				let mut fields = serde_yaml::Mapping::new();
				for (field_name, value) in &record.fields {
					fields.insert(
						serde_yaml::Value::String(field_name.clone()),
						value.to_yaml(),
					);
				}
				items.push(serde_yaml::Value::Mapping(fields));
			}
			root.insert(
				serde_yaml::Value::String(name.clone()),
				serde_yaml::Value::Sequence(items),
			);
		}
		Ok(serde_yaml::to_string(&serde_yaml::Value::Mapping(root))?)
	}

	/// Total number of records across all collections.
	pub fn len(&self) -> usize {
		self.collections.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	const DOC: &str = r#"
roles:
  - name: admin
    description: Administrators
users:
  - email: a@b.com
    hashed_password: "$argon2id$test"
    is_superuser: true
    role_id: "${roles[0].id}"
"#;

	#[rstest]
	fn test_parse_document_preserves_order() {
		let doc = SeedDocument::from_yaml_str(DOC).unwrap();
		let names: Vec<_> = doc.collections.keys().cloned().collect();
		assert_eq!(names, vec!["roles", "users"]);
		assert_eq!(doc.len(), 2);
	}

	#[rstest]
	fn test_parse_literal_and_reference_values() {
		let doc = SeedDocument::from_yaml_str(DOC).unwrap();
		let user = &doc.collections["users"][0];

		assert_eq!(
			user.fields["email"],
			SeedValue::Literal(json!("a@b.com"))
		);
		assert_eq!(user.fields["is_superuser"], SeedValue::Literal(json!(true)));

		let SeedValue::Reference(reference) = &user.fields["role_id"] else {
			panic!("role_id should be a reference");
		};
		assert_eq!(reference.collection, "roles");
		assert_eq!(reference.index, 0);
		assert_eq!(reference.field, "id");
	}

	#[rstest]
	fn test_malformed_reference_is_a_parse_error() {
		let content = "users:\n  - role_id: \"${roles[0]}\"\n";
		assert!(matches!(
			SeedDocument::from_yaml_str(content),
			Err(SeedingError::Parse(_))
		));
	}

	#[rstest]
	fn test_non_mapping_root_is_rejected() {
		assert!(matches!(
			SeedDocument::from_yaml_str("- just\n- a\n- list\n"),
			Err(SeedingError::Parse(_))
		));
	}

	#[rstest]
	fn test_yaml_round_trip_keeps_reference_form() {
		let doc = SeedDocument::from_yaml_str(DOC).unwrap();
		let rendered = doc.to_yaml().unwrap();
		assert!(rendered.contains("${roles[0].id}"));

		let reparsed = SeedDocument::from_yaml_str(&rendered).unwrap();
		assert_eq!(reparsed, doc);
	}
}
