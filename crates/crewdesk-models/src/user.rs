//! User rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user account.
///
/// `hashed_password` is already hashed when it reaches this struct; plain
/// passwords only exist transiently in the CRUD creation path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
	pub id: Uuid,
	pub email: String,
	#[serde(skip_serializing)]
	pub hashed_password: String,
	pub full_name: Option<String>,
	pub is_active: bool,
	pub is_superuser: bool,
	pub role_id: Option<Uuid>,
	pub created_at: DateTime<Utc>,
}
