//! Declared model descriptors.
//!
//! Declaration order matters: it is the tie-break order used when two models
//! have no dependency relationship.

use crate::descriptor::{FieldDescriptor, FieldKind, ModelDescriptor};

const ROLE_FIELDS: &[FieldDescriptor] = &[
	FieldDescriptor::new("name", FieldKind::Str, true),
	FieldDescriptor::new("description", FieldKind::Str, false),
];

const ORGANISATION_FIELDS: &[FieldDescriptor] = &[
	FieldDescriptor::new("name", FieldKind::Str, true),
	FieldDescriptor::new("domain", FieldKind::Str, true),
];

const DEPARTMENT_FIELDS: &[FieldDescriptor] = &[
	FieldDescriptor::new("name", FieldKind::Str, true),
	FieldDescriptor::new("organisation_id", FieldKind::ForeignRef("organisations"), true),
];

const USER_FIELDS: &[FieldDescriptor] = &[
	FieldDescriptor::new("email", FieldKind::Str, true),
	FieldDescriptor::new("hashed_password", FieldKind::Str, true),
	FieldDescriptor::new("full_name", FieldKind::Str, false),
	FieldDescriptor::new("is_active", FieldKind::Bool, false),
	FieldDescriptor::new("is_superuser", FieldKind::Bool, false),
	FieldDescriptor::new("role_id", FieldKind::ForeignRef("roles"), false),
];

const EMPLOYEE_FIELDS: &[FieldDescriptor] = &[
	FieldDescriptor::new("user_id", FieldKind::ForeignRef("users"), true),
	FieldDescriptor::new("organisation_id", FieldKind::ForeignRef("organisations"), true),
	FieldDescriptor::new("department_id", FieldKind::ForeignRef("departments"), false),
	FieldDescriptor::new("position", FieldKind::Str, true),
	FieldDescriptor::new("level", FieldKind::Int, true),
	FieldDescriptor::new("reports_to_id", FieldKind::ForeignRef("employees"), false),
];

const TASK_FIELDS: &[FieldDescriptor] = &[
	FieldDescriptor::new("title", FieldKind::Str, true),
	FieldDescriptor::new("description", FieldKind::Str, false),
	FieldDescriptor::new("status", FieldKind::Str, false),
	FieldDescriptor::new("priority", FieldKind::Str, false),
	FieldDescriptor::new("due_date", FieldKind::Timestamp, false),
	FieldDescriptor::new("start_date", FieldKind::Timestamp, false),
	FieldDescriptor::new("completed_date", FieldKind::Timestamp, false),
	FieldDescriptor::new("owner_id", FieldKind::ForeignRef("users"), true),
	FieldDescriptor::new("creator_id", FieldKind::ForeignRef("users"), true),
	FieldDescriptor::new("parent_id", FieldKind::ForeignRef("tasks"), false),
];

const HIERARCHY_FIELDS: &[FieldDescriptor] = &[
	FieldDescriptor::new("manager_id", FieldKind::ForeignRef("users"), true),
	FieldDescriptor::new("worker_id", FieldKind::ForeignRef("users"), true),
];

/// All model descriptors, in declaration order.
pub fn registry() -> Vec<ModelDescriptor> {
	vec![
		ModelDescriptor {
			name: "roles",
			table: "roles",
			fields: ROLE_FIELDS,
			unique_fields: &["name"],
		},
		ModelDescriptor {
			name: "organisations",
			table: "organisations",
			fields: ORGANISATION_FIELDS,
			unique_fields: &["domain"],
		},
		ModelDescriptor {
			name: "departments",
			table: "departments",
			fields: DEPARTMENT_FIELDS,
			unique_fields: &["name", "organisation_id"],
		},
		ModelDescriptor {
			name: "users",
			table: "users",
			fields: USER_FIELDS,
			unique_fields: &["email"],
		},
		ModelDescriptor {
			name: "employees",
			table: "employees",
			fields: EMPLOYEE_FIELDS,
			unique_fields: &["user_id", "organisation_id"],
		},
		ModelDescriptor {
			name: "tasks",
			table: "tasks",
			fields: TASK_FIELDS,
			unique_fields: &["title", "owner_id"],
		},
		ModelDescriptor {
			name: "hierarchy",
			table: "hierarchy_relationships",
			fields: HIERARCHY_FIELDS,
			unique_fields: &["manager_id", "worker_id"],
		},
	]
}

/// Look up a descriptor by collection name.
pub fn descriptor_for(name: &str) -> Option<ModelDescriptor> {
	registry().into_iter().find(|d| d.name == name)
}
