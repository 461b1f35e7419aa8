//! Manager/worker hierarchy rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A directed manager → worker edge between two users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HierarchyRelationship {
	pub id: Uuid,
	pub manager_id: Uuid,
	pub worker_id: Uuid,
	pub created_at: DateTime<Utc>,
}
