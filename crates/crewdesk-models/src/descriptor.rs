//! Model metadata used by seeding and migrations.

/// Semantic kind of a model field.
///
/// This is a closed enumeration: every value the seeder can generate or
/// resolve is keyed off one of these variants, never off runtime type
/// inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	/// UTF-8 text.
	Str,
	/// 64-bit signed integer.
	Int,
	/// 64-bit float.
	Float,
	/// Boolean.
	Bool,
	/// Timestamp with timezone.
	Timestamp,
	/// UUID identifier generated by the database.
	Id,
	/// Foreign reference into another model, named by its collection name.
	ForeignRef(&'static str),
}

/// One field of a model descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
	/// Column name.
	pub name: &'static str,
	/// Semantic kind.
	pub kind: FieldKind,
	/// Whether a seed record must supply this field.
	pub required: bool,
}

impl FieldDescriptor {
	pub const fn new(name: &'static str, kind: FieldKind, required: bool) -> Self {
		Self {
			name,
			kind,
			required,
		}
	}
}

/// Metadata for one entity type. Immutable once declared.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
	/// Collection name used in seed documents (e.g., "roles").
	pub name: &'static str,
	/// Table name in the database.
	pub table: &'static str,
	/// Insertable fields, in column order.
	pub fields: &'static [FieldDescriptor],
	/// Fields forming the uniqueness constraint used for idempotent seeding.
	pub unique_fields: &'static [&'static str],
}

impl ModelDescriptor {
	/// Collection names this model holds foreign references into.
	///
	/// Self-references are excluded: they constrain record order within a
	/// collection, not the order of collections, and would otherwise read as
	/// a one-node cycle.
	pub fn foreign_refs(&self) -> Vec<&'static str> {
		let mut refs = Vec::new();
		for field in self.fields {
			if let FieldKind::ForeignRef(target) = field.kind {
				if target != self.name && !refs.contains(&target) {
					refs.push(target);
				}
			}
		}
		refs
	}

	/// Look up a field by name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|f| f.name == name)
	}
}
