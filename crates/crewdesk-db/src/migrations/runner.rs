//! Migration application.

use sqlx::PgPool;

use super::recorder::RevisionRecorder;
use super::state::RevisionState;
use super::{Migration, MigrationError, Result, builtin};

/// Outcome of one migration run.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
	/// Names of the migrations applied by this run, in order.
	pub applied: Vec<String>,
	/// Head revision after the run.
	pub head: Option<String>,
}

/// Determine which chain entries are still pending for a revision state.
///
/// An unknown single head is an error: applying the chain from an
/// unrecognized starting point could replay migrations the schema already
/// has. A diverged state must be reconciled before migrating.
pub fn pending_in<'m>(
	chain: &'m [Migration],
	state: &RevisionState,
) -> Result<Vec<&'m Migration>> {
	match state {
		RevisionState::Uninitialized => Ok(chain.iter().collect()),
		RevisionState::Converged(head) => {
			let position = chain
				.iter()
				.position(|m| m.name == head)
				.ok_or_else(|| MigrationError::UnknownRevision(head.clone()))?;
			Ok(chain[position + 1..].iter().collect())
		}
		RevisionState::Diverged(heads) => Err(MigrationError::Divergence(heads.clone())),
	}
}

/// Applies pending migrations from the embedded chain.
pub struct MigrationRunner<'a> {
	pool: &'a PgPool,
	chain: Vec<Migration>,
}

impl<'a> MigrationRunner<'a> {
	/// Runner over the builtin chain.
	pub fn new(pool: &'a PgPool) -> Self {
		Self {
			pool,
			chain: builtin::migrations(),
		}
	}

	/// Runner over an explicit chain.
	pub fn with_chain(pool: &'a PgPool, chain: Vec<Migration>) -> Self {
		Self { pool, chain }
	}

	/// Names of the migrations a run would apply, without applying them.
	pub async fn plan(&self) -> Result<Vec<String>> {
		let recorder = RevisionRecorder::new(self.pool);
		recorder.ensure_table().await?;

		let state = RevisionState::classify(&recorder.heads().await?);
		let pending = pending_in(&self.chain, &state)?;
		Ok(pending.iter().map(|m| m.name.to_string()).collect())
	}

	/// Apply all pending migrations and return what was done.
	///
	/// Each atomic migration runs in its own transaction together with its
	/// revision-table update, so a failure leaves the recorded head at the
	/// last fully applied migration.
	pub async fn migrate(&self) -> Result<MigrationReport> {
		let recorder = RevisionRecorder::new(self.pool);
		recorder.ensure_table().await?;

		let state = RevisionState::classify(&recorder.heads().await?);
		let pending = pending_in(&self.chain, &state)?;

		if pending.is_empty() {
			tracing::info!(head = ?state.head(), "schema is up to date");
			return Ok(MigrationReport {
				applied: Vec::new(),
				head: state.head().map(str::to_string),
			});
		}

		let mut applied = Vec::with_capacity(pending.len());
		for migration in pending {
			tracing::info!(name = %migration.name, "applying migration");
			if migration.atomic {
				let mut tx = self.pool.begin().await?;
				for statement in migration.statements {
					sqlx::raw_sql(statement).execute(&mut *tx).await?;
				}
				RevisionRecorder::record_applied(&mut tx, migration.name).await?;
				tx.commit().await?;
			} else {
				for statement in migration.statements {
					sqlx::raw_sql(statement).execute(self.pool).await?;
				}
				recorder.stamp(migration.name).await?;
			}
			applied.push(migration.name.to_string());
		}

		let head = applied.last().cloned();
		tracing::info!(count = applied.len(), head = ?head, "migrations applied");
		Ok(MigrationReport { applied, head })
	}
}
