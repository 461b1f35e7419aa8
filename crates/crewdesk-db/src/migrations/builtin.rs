//! The embedded migration chain.
//!
//! Order matters: the chain is linear and each entry's name is the revision
//! id recorded in the tracking table once it is applied.

use super::migration::Migration;

const INITIAL: &[&str] = &[
	"CREATE EXTENSION IF NOT EXISTS pgcrypto",
	r#"CREATE TABLE roles (
		id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
		name VARCHAR(50) NOT NULL UNIQUE,
		description VARCHAR(255)
	)"#,
	r#"CREATE TABLE organisations (
		id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
		name VARCHAR(255) NOT NULL,
		domain VARCHAR(255) NOT NULL UNIQUE,
		created_at TIMESTAMPTZ NOT NULL DEFAULT now()
	)"#,
	r#"CREATE TABLE departments (
		id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
		name VARCHAR(255) NOT NULL,
		organisation_id UUID NOT NULL REFERENCES organisations(id) ON DELETE CASCADE,
		created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
		UNIQUE (name, organisation_id)
	)"#,
	r#"CREATE TABLE users (
		id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
		email VARCHAR(255) NOT NULL UNIQUE,
		hashed_password VARCHAR(255) NOT NULL,
		full_name VARCHAR(255),
		is_active BOOLEAN NOT NULL DEFAULT TRUE,
		is_superuser BOOLEAN NOT NULL DEFAULT FALSE,
		role_id UUID REFERENCES roles(id),
		created_at TIMESTAMPTZ NOT NULL DEFAULT now()
	)"#,
	r#"CREATE TABLE employees (
		id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
		user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
		organisation_id UUID NOT NULL REFERENCES organisations(id) ON DELETE CASCADE,
		department_id UUID REFERENCES departments(id),
		position VARCHAR(255) NOT NULL,
		level INTEGER NOT NULL,
		reports_to_id UUID REFERENCES employees(id),
		created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
		UNIQUE (user_id, organisation_id)
	)"#,
	"CREATE INDEX employees_organisation_idx ON employees (organisation_id)",
];

// The legacy schema created native enum types for task status/priority;
// they conflict with the text-backed columns created in 0003.
const DROP_LEGACY_TASK_ENUMS: &[&str] = &[
	"DROP TABLE IF EXISTS tasks CASCADE",
	"DROP TYPE IF EXISTS taskstatus CASCADE",
	"DROP TYPE IF EXISTS taskpriority CASCADE",
];

const TASKS: &[&str] = &[
	r#"CREATE TABLE tasks (
		id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
		title VARCHAR(255) NOT NULL,
		description VARCHAR(1000),
		status VARCHAR(20) NOT NULL DEFAULT 'todo'
			CHECK (status IN ('todo', 'in_progress', 'done', 'blocked', 'reopened')),
		priority VARCHAR(20) NOT NULL DEFAULT 'medium'
			CHECK (priority IN ('low', 'medium', 'high', 'urgent')),
		due_date TIMESTAMPTZ,
		start_date TIMESTAMPTZ,
		completed_date TIMESTAMPTZ,
		created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
		owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
		creator_id UUID NOT NULL REFERENCES users(id),
		parent_id UUID REFERENCES tasks(id),
		UNIQUE (title, owner_id)
	)"#,
	"CREATE INDEX tasks_owner_idx ON tasks (owner_id)",
	"CREATE INDEX tasks_status_idx ON tasks (status)",
];

const HIERARCHY: &[&str] = &[
	r#"CREATE TABLE hierarchy_relationships (
		id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
		manager_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
		worker_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
		created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
		UNIQUE (manager_id, worker_id)
	)"#,
];

/// The full migration chain, in application order.
pub fn migrations() -> Vec<Migration> {
	vec![
		Migration::new("0001_initial", INITIAL),
		Migration::new("0002_drop_legacy_task_enums", DROP_LEGACY_TASK_ENUMS),
		Migration::new("0003_tasks", TASKS),
		Migration::new("0004_hierarchy", HIERARCHY),
	]
}

/// Name of the newest migration in the chain, if any.
pub fn latest() -> Option<&'static str> {
	migrations().last().map(|m| m.name)
}
