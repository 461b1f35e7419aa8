//! Dependency graph over model descriptors.
//!
//! Derived, never persisted: an edge from model A to model B exists when
//! any field of A is a foreign reference into B. The graph must be acyclic
//! for seeding to terminate; validation happens once, before any row is
//! inserted.

use std::collections::HashMap;

use crewdesk_models::ModelDescriptor;

use crate::error::{SeedingError, SeedingResult};

#[derive(Clone, Copy, PartialEq)]
enum Visit {
	InProgress,
	Done,
}

/// Foreign-key dependency graph over a set of model descriptors.
pub struct DependencyGraph<'a> {
	models: &'a [ModelDescriptor],
}

impl<'a> DependencyGraph<'a> {
	pub fn new(models: &'a [ModelDescriptor]) -> Self {
		Self { models }
	}

	/// Topologically order the models, dependencies first.
	///
	/// Depth-first: a model is appended only after all its dependencies
	/// have been visited; ties among independent models fall back to
	/// declaration order. A cycle fails with a configuration error naming
	/// the cycle.
	pub fn topo_order(&self) -> SeedingResult<Vec<&'a ModelDescriptor>> {
		let by_name: HashMap<&str, &ModelDescriptor> =
			self.models.iter().map(|m| (m.name, m)).collect();

		let mut states: HashMap<&str, Visit> = HashMap::new();
		let mut order = Vec::with_capacity(self.models.len());

		for model in self.models {
			let mut path = Vec::new();
			self.visit(model, &by_name, &mut states, &mut path, &mut order)?;
		}

		Ok(order)
	}

	fn visit(
		&self,
		model: &'a ModelDescriptor,
		by_name: &HashMap<&str, &'a ModelDescriptor>,
		states: &mut HashMap<&'a str, Visit>,
		path: &mut Vec<&'a str>,
		order: &mut Vec<&'a ModelDescriptor>,
	) -> SeedingResult<()> {
		match states.get(model.name) {
			Some(Visit::Done) => return Ok(()),
			Some(Visit::InProgress) => {
				let mut cycle: Vec<&str> = path
					.iter()
					.copied()
					.skip_while(|n| *n != model.name)
					.collect();
				cycle.push(model.name);
				return Err(SeedingError::Configuration(format!(
					"cyclic model dependencies: {}",
					cycle.join(" -> ")
				)));
			}
			None => {}
		}

		states.insert(model.name, Visit::InProgress);
		path.push(model.name);

		for target in model.foreign_refs() {
			let dependency = *by_name.get(target).ok_or_else(|| {
				SeedingError::Configuration(format!(
					"model '{}' references undeclared model '{}'",
					model.name, target
				))
			})?;
			self.visit(dependency, by_name, states, path, order)?;
		}

		path.pop();
		states.insert(model.name, Visit::Done);
		order.push(model);
		Ok(())
	}
}
