//! Seeded-record registry.
//!
//! Process-local map from (collection, position) to the generated id and
//! resolved field values of a seeded record. Created empty at the start of
//! a run, consulted when resolving references, discarded at the end;
//! never shared across runs.

use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{SeedingError, SeedingResult};
use crate::reference::SeedRef;

/// One seeded record's identity and resolved values.
#[derive(Debug, Clone)]
pub struct SeededRecord {
	/// Generated identifier of the inserted (or already existing) row.
	pub id: Uuid,
	/// Resolved field values the record was inserted with.
	pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Registry of everything seeded so far in this run.
#[derive(Debug, Default)]
pub struct SeededRegistry {
	collections: HashMap<String, Vec<SeededRecord>>,
}

impl SeededRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a seeded row under the next position of its collection.
	pub fn record(
		&mut self,
		collection: &str,
		id: Uuid,
		fields: serde_json::Map<String, serde_json::Value>,
	) {
		self.collections
			.entry(collection.to_string())
			.or_default()
			.push(SeededRecord { id, fields });
	}

	/// Number of records seeded for a collection so far.
	pub fn count(&self, collection: &str) -> usize {
		self.collections.get(collection).map_or(0, Vec::len)
	}

	/// Resolve a reference against what has been seeded.
	///
	/// Unknown collections, out-of-range indexes and unknown fields are all
	/// reference errors, never a silent null.
	pub fn resolve(&self, reference: &SeedRef) -> SeedingResult<serde_json::Value> {
		let records = self.collections.get(&reference.collection).ok_or_else(|| {
			SeedingError::Reference(format!(
				"{} refers to collection '{}', which has no seeded records",
				reference, reference.collection
			))
		})?;

		let record = records.get(reference.index).ok_or_else(|| {
			SeedingError::Reference(format!(
				"{} is out of range: only {} record(s) of '{}' seeded so far",
				reference,
				records.len(),
				reference.collection
			))
		})?;

		if reference.field == "id" {
			return Ok(serde_json::Value::String(record.id.to_string()));
		}

		record.fields.get(&reference.field).cloned().ok_or_else(|| {
			SeedingError::Reference(format!(
				"{} names a field the seeded record does not have",
				reference
			))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reference::parse_reference;
	use rstest::rstest;
	use serde_json::json;

	fn fields(pairs: &[(&str, serde_json::Value)]) -> serde_json::Map<String, serde_json::Value> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.clone()))
			.collect()
	}

	#[rstest]
	fn test_resolve_id_reference() {
		let mut registry = SeededRegistry::new();
		let id = Uuid::new_v4();
		registry.record("roles", id, fields(&[("name", json!("admin"))]));

		let resolved = registry
			.resolve(&parse_reference("${roles[0].id}").unwrap())
			.unwrap();
		assert_eq!(resolved, json!(id.to_string()));
	}

	#[rstest]
	fn test_resolve_field_reference() {
		let mut registry = SeededRegistry::new();
		registry.record(
			"roles",
			Uuid::new_v4(),
			fields(&[("name", json!("admin"))]),
		);

		let resolved = registry
			.resolve(&parse_reference("${roles[0].name}").unwrap())
			.unwrap();
		assert_eq!(resolved, json!("admin"));
	}

	#[rstest]
	fn test_unknown_collection_is_a_reference_error() {
		let registry = SeededRegistry::new();
		let result = registry.resolve(&parse_reference("${roles[0].id}").unwrap());
		assert!(matches!(result, Err(SeedingError::Reference(_))));
	}

	#[rstest]
	fn test_out_of_range_index_is_a_reference_error() {
		let mut registry = SeededRegistry::new();
		registry.record("roles", Uuid::new_v4(), fields(&[]));

		let result = registry.resolve(&parse_reference("${roles[1].id}").unwrap());
		assert!(matches!(result, Err(SeedingError::Reference(_))));
		assert!(result.unwrap_err().to_string().contains("out of range"));
	}

	#[rstest]
	fn test_unknown_field_is_a_reference_error() {
		let mut registry = SeededRegistry::new();
		registry.record("roles", Uuid::new_v4(), fields(&[("name", json!("admin"))]));

		let result = registry.resolve(&parse_reference("${roles[0].colour}").unwrap());
		assert!(matches!(result, Err(SeedingError::Reference(_))));
	}

	#[rstest]
	fn test_count_tracks_positions() {
		let mut registry = SeededRegistry::new();
		assert_eq!(registry.count("roles"), 0);
		registry.record("roles", Uuid::new_v4(), fields(&[]));
		registry.record("roles", Uuid::new_v4(), fields(&[]));
		assert_eq!(registry.count("roles"), 2);
	}
}
