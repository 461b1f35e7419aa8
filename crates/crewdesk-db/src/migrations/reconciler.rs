//! Revision-state reconciliation.
//!
//! Runs immediately before migrations are applied. Handles the two
//! operator-gated destructive resets and the divergent-history shortcut:
//! when more than one head is recorded, the history is reset and stamped
//! at the latest available migration without replaying anything. That
//! shortcut assumes the live schema already matches the latest head's
//! shape; the assumption is not verified.

use sqlx::PgPool;

use crewdesk_conf::{DatabaseSettings, OnResetFailure};

use super::recorder::RevisionRecorder;
use super::state::RevisionState;
use super::{MigrationError, Result, builtin};

/// What reconciliation will do, derived from configuration alone.
///
/// Both destructive operations default to disabled and only appear in the
/// plan when the operator set their flag explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
	/// Drop and recreate the whole schema namespace.
	pub full_reset: bool,
	/// Delete all revision rows without touching other tables.
	pub history_reset: bool,
	/// Failure policy for the full reset.
	pub full_reset_failure: OnResetFailure,
	/// Failure policy for the history reset.
	pub history_reset_failure: OnResetFailure,
}

impl ReconcilePlan {
	/// Derive the plan from database settings.
	pub fn from_settings(settings: &DatabaseSettings) -> Self {
		Self {
			full_reset: settings.full_reset,
			history_reset: settings.history_reset,
			full_reset_failure: settings.full_reset_failure,
			history_reset_failure: settings.history_reset_failure,
		}
	}
}

/// Remediation for a revision state: the revision to force-stamp, if any.
///
/// Only a diverged history is remediated, and only when the chain has a
/// latest migration to stamp.
pub fn remediation_for(state: &RevisionState, latest: Option<&str>) -> Option<String> {
	match state {
		RevisionState::Diverged(_) => latest.map(str::to_string),
		_ => None,
	}
}

/// Reconciles the recorded revision state against the migration chain.
pub struct Reconciler<'a> {
	pool: &'a PgPool,
	plan: ReconcilePlan,
}

impl<'a> Reconciler<'a> {
	pub fn new(pool: &'a PgPool, settings: &DatabaseSettings) -> Self {
		Self {
			pool,
			plan: ReconcilePlan::from_settings(settings),
		}
	}

	/// The derived plan.
	pub fn plan(&self) -> &ReconcilePlan {
		&self.plan
	}

	/// Run reconciliation; returns the revision state migrations will see.
	pub async fn reconcile(&self) -> Result<RevisionState> {
		let recorder = RevisionRecorder::new(self.pool);
		recorder.ensure_table().await?;

		if self.plan.full_reset {
			tracing::warn!("full schema reset requested; dropping schema namespace");
			let result = recorder.reset_schema().await;
			apply_policy("full schema reset", self.plan.full_reset_failure, result)?;
		}

		if self.plan.history_reset {
			tracing::warn!("revision history reset requested; clearing revision rows");
			let result = recorder.clear_history().await;
			apply_policy(
				"revision history reset",
				self.plan.history_reset_failure,
				result,
			)?;
		}

		let state = RevisionState::classify(&recorder.heads().await?);

		if let Some(revision) = remediation_for(&state, builtin::latest()) {
			tracing::warn!(
				heads = ?state,
				stamp = %revision,
				"divergent revision history; resetting and stamping latest without replay"
			);
			recorder.reset_table().await?;
			recorder.stamp(&revision).await?;
			return Ok(RevisionState::Converged(revision));
		}

		Ok(state)
	}
}

/// Map a reset outcome through its configured failure policy.
fn apply_policy(
	operation: &'static str,
	policy: OnResetFailure,
	result: Result<()>,
) -> Result<()> {
	match result {
		Ok(()) => Ok(()),
		Err(error) => {
			tracing::error!(%operation, %error, "destructive reset failed");
			match policy {
				OnResetFailure::Swallow => Ok(()),
				OnResetFailure::Propagate => match error {
					MigrationError::Sql(source) => Err(MigrationError::DestructiveOperation {
						operation,
						source,
					}),
					other => Err(other),
				},
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn settings(full_reset: bool, history_reset: bool) -> DatabaseSettings {
		DatabaseSettings {
			user: "postgres".to_string(),
			password: "postgres".to_string(),
			host: "localhost".to_string(),
			port: 5432,
			name: "postgres".to_string(),
			full_reset,
			history_reset,
			full_reset_failure: OnResetFailure::Swallow,
			history_reset_failure: OnResetFailure::Propagate,
		}
	}

	#[rstest]
	fn test_plan_defaults_to_no_destructive_ops() {
		let plan = ReconcilePlan::from_settings(&settings(false, false));
		assert!(!plan.full_reset);
		assert!(!plan.history_reset);
	}

	#[rstest]
	fn test_plan_honors_flags() {
		let plan = ReconcilePlan::from_settings(&settings(true, true));
		assert!(plan.full_reset);
		assert!(plan.history_reset);
	}

	#[rstest]
	fn test_converged_state_needs_no_remediation() {
		let state = RevisionState::Converged("0003_tasks".to_string());
		assert_eq!(remediation_for(&state, Some("0004_hierarchy")), None);
	}

	#[rstest]
	fn test_uninitialized_state_needs_no_remediation() {
		assert_eq!(
			remediation_for(&RevisionState::Uninitialized, Some("0004_hierarchy")),
			None
		);
	}

	#[rstest]
	fn test_diverged_state_restamps_latest() {
		let state =
			RevisionState::Diverged(vec!["0002_a".to_string(), "0003_b".to_string()]);
		assert_eq!(
			remediation_for(&state, Some("0004_hierarchy")),
			Some("0004_hierarchy".to_string())
		);
	}

	#[rstest]
	fn test_diverged_with_empty_chain_is_left_alone() {
		let state =
			RevisionState::Diverged(vec!["0002_a".to_string(), "0003_b".to_string()]);
		assert_eq!(remediation_for(&state, None), None);
	}

	#[rstest]
	fn test_swallow_policy_suppresses_failure() {
		let result = apply_policy(
			"full schema reset",
			OnResetFailure::Swallow,
			Err(MigrationError::Sql(sqlx::Error::PoolClosed)),
		);
		assert!(result.is_ok());
	}

	#[rstest]
	fn test_propagate_policy_surfaces_failure() {
		let result = apply_policy(
			"revision history reset",
			OnResetFailure::Propagate,
			Err(MigrationError::Sql(sqlx::Error::PoolClosed)),
		);
		assert!(matches!(
			result,
			Err(MigrationError::DestructiveOperation {
				operation: "revision history reset",
				..
			})
		));
	}
}
