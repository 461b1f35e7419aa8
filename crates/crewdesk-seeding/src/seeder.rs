//! The dependency-ordered seeder.

use sqlx::{PgConnection, PgPool, Postgres};
use uuid::Uuid;

use crewdesk_models::{ModelDescriptor, registry};

use crate::document::{SeedDocument, SeedRecord, SeedValue};
use crate::error::{SeedingError, SeedingResult};
use crate::graph::DependencyGraph;
use crate::params::{ParamValue, build_arguments};
use crate::registry::SeededRegistry;

/// Outcome of one seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
	/// Rows inserted by this run.
	pub inserted: usize,
	/// Records skipped because a matching row already existed.
	pub skipped: usize,
}

/// Inserts seed records in foreign-key dependency order.
pub struct Seeder<'a> {
	pool: &'a PgPool,
	models: Vec<ModelDescriptor>,
}

impl<'a> Seeder<'a> {
	/// Seeder over the declared model registry.
	pub fn new(pool: &'a PgPool) -> Self {
		Self {
			pool,
			models: registry(),
		}
	}

	/// Seed every collection in the document.
	///
	/// The dependency graph is validated before any row is inserted. Each
	/// model group commits in its own transaction: a failure rolls back
	/// that group only, leaving previously committed groups in place, and
	/// aborts the run.
	pub async fn seed(&self, document: &SeedDocument) -> SeedingResult<SeedReport> {
		for collection in document.collections.keys() {
			if !self.models.iter().any(|m| m.name == collection.as_str()) {
				return Err(SeedingError::Configuration(format!(
					"unknown collection '{}' in seed document",
					collection
				)));
			}
		}

		let graph = DependencyGraph::new(&self.models);
		let order = graph.topo_order()?;

		let mut seeded = SeededRegistry::new();
		let mut report = SeedReport::default();

		for model in order {
			let Some(records) = document.collections.get(model.name) else {
				continue;
			};
			if records.is_empty() {
				continue;
			}

			let mut tx = self.pool.begin().await?;
			let mut inserted = 0usize;
			let mut skipped = 0usize;

			for record in records {
				let resolved = resolve_record(model, record, &seeded)?;

				match find_existing(&mut *tx, model, &resolved).await? {
					Some(id) => {
						skipped += 1;
						seeded.record(model.name, id, resolved);
					}
					None => {
						let id = insert_record(&mut *tx, model, &resolved).await?;
						inserted += 1;
						seeded.record(model.name, id, resolved);
					}
				}
			}

			tx.commit().await?;
			tracing::info!(
				collection = model.name,
				inserted,
				skipped,
				"seeded collection"
			);
			report.inserted += inserted;
			report.skipped += skipped;
		}

		Ok(report)
	}
}

/// Resolve a record's values against the descriptor and what has already
/// been seeded.
///
/// Reference resolution happens first, before any uniqueness handling, so
/// a record whose unique fields are themselves references works. Explicit
/// nulls are treated as absent; unknown and missing-required fields are
/// invalid-value errors.
pub fn resolve_record(
	model: &ModelDescriptor,
	record: &SeedRecord,
	seeded: &SeededRegistry,
) -> SeedingResult<serde_json::Map<String, serde_json::Value>> {
	let mut resolved = serde_json::Map::new();

	for (name, value) in &record.fields {
		if model.field(name).is_none() {
			return Err(SeedingError::InvalidValue {
				field: name.clone(),
				message: format!("not a declared field of '{}'", model.name),
			});
		}

		let json = match value {
			SeedValue::Literal(serde_json::Value::Null) => continue,
			SeedValue::Literal(literal) => literal.clone(),
			SeedValue::Reference(reference) => seeded.resolve(reference)?,
		};
		resolved.insert(name.clone(), json);
	}

	for field in model.fields {
		if field.required && !resolved.contains_key(field.name) {
			return Err(SeedingError::InvalidValue {
				field: field.name.to_string(),
				message: format!("required field of '{}' is missing", model.name),
			});
		}
	}

	Ok(resolved)
}

/// Extract the typed bind parameters for the model's uniqueness constraint.
fn unique_params(
	model: &ModelDescriptor,
	resolved: &serde_json::Map<String, serde_json::Value>,
) -> SeedingResult<Vec<ParamValue>> {
	let mut params = Vec::with_capacity(model.unique_fields.len());
	for name in model.unique_fields {
		let field = model.field(name).ok_or_else(|| SeedingError::InvalidValue {
			field: name.to_string(),
			message: format!("uniqueness field is not declared on '{}'", model.name),
		})?;
		let value = resolved.get(*name).ok_or_else(|| SeedingError::InvalidValue {
			field: name.to_string(),
			message: format!("uniqueness field of '{}' has no value", model.name),
		})?;
		params.push(ParamValue::from_json(field, value)?);
	}
	Ok(params)
}

/// Find the id of an existing row matching the uniqueness constraint.
async fn find_existing(
	conn: &mut PgConnection,
	model: &ModelDescriptor,
	resolved: &serde_json::Map<String, serde_json::Value>,
) -> SeedingResult<Option<Uuid>> {
	let params = unique_params(model, resolved)?;

	let predicate = model
		.unique_fields
		.iter()
		.enumerate()
		.map(|(i, name)| format!("{} = ${}", name, i + 1))
		.collect::<Vec<_>>()
		.join(" AND ");
	let sql = format!("SELECT id FROM {} WHERE {} LIMIT 1", model.table, predicate);

	let arguments = build_arguments(&params)?;
	let id = sqlx::query_scalar_with::<Postgres, Uuid, _>(&sql, arguments)
		.fetch_optional(&mut *conn)
		.await?;
	Ok(id)
}

/// Insert a resolved record and return the generated identifier.
async fn insert_record(
	conn: &mut PgConnection,
	model: &ModelDescriptor,
	resolved: &serde_json::Map<String, serde_json::Value>,
) -> SeedingResult<Uuid> {
	let mut columns = Vec::new();
	let mut params = Vec::new();
	for field in model.fields {
		if let Some(value) = resolved.get(field.name) {
			columns.push(field.name);
			params.push(ParamValue::from_json(field, value)?);
		}
	}

	let placeholders = (1..=columns.len())
		.map(|i| format!("${}", i))
		.collect::<Vec<_>>()
		.join(", ");
	let sql = format!(
		"INSERT INTO {} ({}) VALUES ({}) RETURNING id",
		model.table,
		columns.join(", "),
		placeholders
	);

	let arguments = build_arguments(&params)?;
	let id = sqlx::query_scalar_with::<Postgres, Uuid, _>(&sql, arguments)
		.fetch_one(&mut *conn)
		.await?;
	Ok(id)
}
