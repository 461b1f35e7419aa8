//! Task rows and their status/priority enumerations.
//!
//! Status and priority are stored as lowercase text with CHECK constraints
//! rather than native enum types; the legacy enum types are dropped by the
//! `0002_drop_legacy_task_enums` migration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// A stored status/priority value that is not part of the enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
	kind: &'static str,
	value: String,
}

impl fmt::Display for UnknownVariant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown {} '{}'", self.kind, self.value)
	}
}

impl std::error::Error for UnknownVariant {}

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
	#[default]
	Todo,
	InProgress,
	Done,
	Blocked,
	Reopened,
}

impl TaskStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Todo => "todo",
			Self::InProgress => "in_progress",
			Self::Done => "done",
			Self::Blocked => "blocked",
			Self::Reopened => "reopened",
		}
	}
}

impl fmt::Display for TaskStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl TryFrom<String> for TaskStatus {
	type Error = UnknownVariant;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		match value.as_str() {
			"todo" => Ok(Self::Todo),
			"in_progress" => Ok(Self::InProgress),
			"done" => Ok(Self::Done),
			"blocked" => Ok(Self::Blocked),
			"reopened" => Ok(Self::Reopened),
			_ => Err(UnknownVariant {
				kind: "task status",
				value,
			}),
		}
	}
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
	Low,
	#[default]
	Medium,
	High,
	Urgent,
}

impl TaskPriority {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Low => "low",
			Self::Medium => "medium",
			Self::High => "high",
			Self::Urgent => "urgent",
		}
	}
}

impl fmt::Display for TaskPriority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl TryFrom<String> for TaskPriority {
	type Error = UnknownVariant;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		match value.as_str() {
			"low" => Ok(Self::Low),
			"medium" => Ok(Self::Medium),
			"high" => Ok(Self::High),
			"urgent" => Ok(Self::Urgent),
			_ => Err(UnknownVariant {
				kind: "task priority",
				value,
			}),
		}
	}
}

/// A task owned by a user, optionally nested under a parent task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
	pub id: Uuid,
	pub title: String,
	pub description: Option<String>,
	#[sqlx(try_from = "String")]
	pub status: TaskStatus,
	#[sqlx(try_from = "String")]
	pub priority: TaskPriority,
	pub due_date: Option<DateTime<Utc>>,
	pub start_date: Option<DateTime<Utc>>,
	pub completed_date: Option<DateTime<Utc>>,
	pub created_at: DateTime<Utc>,
	pub owner_id: Uuid,
	pub creator_id: Uuid,
	pub parent_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(TaskStatus::Todo, "todo")]
	#[case(TaskStatus::InProgress, "in_progress")]
	#[case(TaskStatus::Done, "done")]
	#[case(TaskStatus::Blocked, "blocked")]
	#[case(TaskStatus::Reopened, "reopened")]
	fn test_status_round_trip(#[case] status: TaskStatus, #[case] text: &str) {
		assert_eq!(status.as_str(), text);
		assert_eq!(TaskStatus::try_from(text.to_string()).unwrap(), status);
	}

	#[rstest]
	fn test_status_rejects_unknown() {
		assert!(TaskStatus::try_from("paused".to_string()).is_err());
	}

	#[rstest]
	#[case(TaskPriority::Low, "low")]
	#[case(TaskPriority::Urgent, "urgent")]
	fn test_priority_round_trip(#[case] priority: TaskPriority, #[case] text: &str) {
		assert_eq!(priority.as_str(), text);
		assert_eq!(TaskPriority::try_from(text.to_string()).unwrap(), priority);
	}

	#[rstest]
	fn test_defaults() {
		assert_eq!(TaskStatus::default(), TaskStatus::Todo);
		assert_eq!(TaskPriority::default(), TaskPriority::Medium);
	}
}
