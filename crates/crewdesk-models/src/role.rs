//! Role rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named role users can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
	pub id: Uuid,
	pub name: String,
	pub description: Option<String>,
}
