//! Organisation, department and employee rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An organisation, identified by its unique domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Organisation {
	pub id: Uuid,
	pub name: String,
	pub domain: String,
	pub created_at: DateTime<Utc>,
}

/// A department within an organisation. Department names are only unique
/// per organisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Department {
	pub id: Uuid,
	pub name: String,
	pub organisation_id: Uuid,
	pub created_at: DateTime<Utc>,
}

/// An employment record linking a user to an organisation.
///
/// `reports_to_id` points at another employee row; the chain is acyclic by
/// convention, not by constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Employee {
	pub id: Uuid,
	pub user_id: Uuid,
	pub organisation_id: Uuid,
	pub department_id: Option<Uuid>,
	pub position: String,
	pub level: i32,
	pub reports_to_id: Option<Uuid>,
	pub created_at: DateTime<Utc>,
}
