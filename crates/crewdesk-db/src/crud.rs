//! Row-level CRUD helpers.
//!
//! Every function takes the pool explicitly; nothing here holds global
//! state. Password hashing goes through argon2 and only ever stores the
//! PHC string form.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crewdesk_conf::Settings;
use crewdesk_models::{Department, Organisation, Task, TaskPriority, User};

use crate::error::{DbError, DbResult};

/// Hash a plain password into its PHC string form.
pub fn hash_password(password: &str) -> DbResult<String> {
	let salt = SaltString::generate(&mut OsRng);
	let hash = Argon2::default()
		.hash_password(password.as_bytes(), &salt)
		.map_err(|e| DbError::PasswordHash(e.to_string()))?;
	Ok(hash.to_string())
}

/// Create a user with a freshly hashed password.
pub async fn create_user(
	pool: &PgPool,
	email: &str,
	password: &str,
	full_name: Option<&str>,
	is_superuser: bool,
) -> DbResult<User> {
	let hashed = hash_password(password)?;
	let user = sqlx::query_as::<_, User>(
		"INSERT INTO users (email, hashed_password, full_name, is_superuser) \
		 VALUES ($1, $2, $3, $4) RETURNING *",
	)
	.bind(email)
	.bind(&hashed)
	.bind(full_name)
	.bind(is_superuser)
	.fetch_one(pool)
	.await?;
	Ok(user)
}

/// Look a user up by email.
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> DbResult<Option<User>> {
	let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
		.bind(email)
		.fetch_optional(pool)
		.await?;
	Ok(user)
}

/// Update a user's mutable profile fields; absent values are left as-is.
pub async fn update_user(
	pool: &PgPool,
	id: Uuid,
	full_name: Option<&str>,
	is_active: Option<bool>,
) -> DbResult<Option<User>> {
	let user = sqlx::query_as::<_, User>(
		"UPDATE users SET full_name = COALESCE($2, full_name), \
		 is_active = COALESCE($3, is_active) WHERE id = $1 RETURNING *",
	)
	.bind(id)
	.bind(full_name)
	.bind(is_active)
	.fetch_optional(pool)
	.await?;
	Ok(user)
}

/// Delete a user; returns whether a row was removed.
pub async fn delete_user(pool: &PgPool, id: Uuid) -> DbResult<bool> {
	let result = sqlx::query("DELETE FROM users WHERE id = $1")
		.bind(id)
		.execute(pool)
		.await?;
	Ok(result.rows_affected() > 0)
}

/// Parameters for creating a task.
#[derive(Debug, Clone)]
pub struct NewTask {
	pub title: String,
	pub description: Option<String>,
	pub priority: TaskPriority,
	pub due_date: Option<DateTime<Utc>>,
	pub owner_id: Uuid,
	pub creator_id: Uuid,
	pub parent_id: Option<Uuid>,
}

/// Create a task in the default `todo` state.
pub async fn create_task(pool: &PgPool, new: &NewTask) -> DbResult<Task> {
	let task = sqlx::query_as::<_, Task>(
		"INSERT INTO tasks (title, description, priority, due_date, owner_id, creator_id, parent_id) \
		 VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
	)
	.bind(&new.title)
	.bind(&new.description)
	.bind(new.priority.as_str())
	.bind(new.due_date)
	.bind(new.owner_id)
	.bind(new.creator_id)
	.bind(new.parent_id)
	.fetch_one(pool)
	.await?;
	Ok(task)
}

/// All tasks owned by a user, newest first.
pub async fn tasks_for_owner(pool: &PgPool, owner_id: Uuid) -> DbResult<Vec<Task>> {
	let tasks = sqlx::query_as::<_, Task>(
		"SELECT * FROM tasks WHERE owner_id = $1 ORDER BY created_at DESC",
	)
	.bind(owner_id)
	.fetch_all(pool)
	.await?;
	Ok(tasks)
}

/// Mark a task done and stamp its completion date.
pub async fn complete_task(pool: &PgPool, id: Uuid) -> DbResult<Option<Task>> {
	let task = sqlx::query_as::<_, Task>(
		"UPDATE tasks SET status = 'done', completed_date = now() WHERE id = $1 RETURNING *",
	)
	.bind(id)
	.fetch_optional(pool)
	.await?;
	Ok(task)
}

/// Create an organisation.
pub async fn create_organisation(
	pool: &PgPool,
	name: &str,
	domain: &str,
) -> DbResult<Organisation> {
	let organisation = sqlx::query_as::<_, Organisation>(
		"INSERT INTO organisations (name, domain) VALUES ($1, $2) RETURNING *",
	)
	.bind(name)
	.bind(domain)
	.fetch_one(pool)
	.await?;
	Ok(organisation)
}

/// Departments of an organisation, by name.
pub async fn departments_of(pool: &PgPool, organisation_id: Uuid) -> DbResult<Vec<Department>> {
	let departments = sqlx::query_as::<_, Department>(
		"SELECT * FROM departments WHERE organisation_id = $1 ORDER BY name",
	)
	.bind(organisation_id)
	.fetch_all(pool)
	.await?;
	Ok(departments)
}

/// Ensure the configured first superuser exists.
///
/// A no-op when the superuser settings are absent or the account already
/// exists; returns the user when one was created.
pub async fn init_db(pool: &PgPool, settings: &Settings) -> DbResult<Option<User>> {
	let (Some(email), Some(password)) = (
		settings.first_superuser.as_deref(),
		settings.first_superuser_password.as_deref(),
	) else {
		return Ok(None);
	};

	if get_user_by_email(pool, email).await?.is_some() {
		return Ok(None);
	}

	tracing::info!(%email, "creating first superuser");
	let user = create_user(pool, email, password, None, true).await?;
	Ok(Some(user))
}
