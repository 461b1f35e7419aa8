//! Revision recorder.
//!
//! Owns the revision-tracking table: a single `revision` column, primary
//! key on that column, alembic-style. Under normal operation the table
//! holds exactly one row.

use sqlx::{PgConnection, PgPool};

use super::Result;

const CREATE_TABLE: &str =
	"CREATE TABLE IF NOT EXISTS crewdesk_revision (revision VARCHAR(64) PRIMARY KEY)";

/// Database-backed revision recorder.
pub struct RevisionRecorder<'a> {
	pool: &'a PgPool,
}

impl<'a> RevisionRecorder<'a> {
	pub fn new(pool: &'a PgPool) -> Self {
		Self { pool }
	}

	/// Create the revision-tracking table if it does not exist.
	pub async fn ensure_table(&self) -> Result<()> {
		sqlx::raw_sql(CREATE_TABLE).execute(self.pool).await?;
		Ok(())
	}

	/// All recorded head revisions. Normally zero (uninitialized schema)
	/// or one; more than one means the history diverged.
	pub async fn heads(&self) -> Result<Vec<String>> {
		let heads = sqlx::query_scalar::<_, String>(
			"SELECT revision FROM crewdesk_revision ORDER BY revision",
		)
		.fetch_all(self.pool)
		.await?;
		Ok(heads)
	}

	/// Replace whatever is recorded inside an open transaction with the
	/// given revision. Used by the runner after each applied migration so
	/// the update commits (or rolls back) with the migration itself.
	pub async fn record_applied(conn: &mut PgConnection, revision: &str) -> Result<()> {
		sqlx::query("DELETE FROM crewdesk_revision")
			.execute(&mut *conn)
			.await?;
		sqlx::query("INSERT INTO crewdesk_revision (revision) VALUES ($1)")
			.bind(revision)
			.execute(&mut *conn)
			.await?;
		Ok(())
	}

	/// Stamp the history with a single revision without applying anything.
	pub async fn stamp(&self, revision: &str) -> Result<()> {
		let mut tx = self.pool.begin().await?;
		Self::record_applied(&mut tx, revision).await?;
		tx.commit().await?;
		Ok(())
	}

	/// Delete all revision rows, leaving other tables untouched.
	pub async fn clear_history(&self) -> Result<()> {
		sqlx::query("DELETE FROM crewdesk_revision")
			.execute(self.pool)
			.await?;
		Ok(())
	}

	/// Drop and recreate the revision-tracking table, empty.
	pub async fn reset_table(&self) -> Result<()> {
		sqlx::raw_sql("DROP TABLE IF EXISTS crewdesk_revision")
			.execute(self.pool)
			.await?;
		self.ensure_table().await
	}

	/// Drop and recreate the whole schema namespace, leaving only an empty
	/// revision-tracking table.
	pub async fn reset_schema(&self) -> Result<()> {
		sqlx::raw_sql("DROP SCHEMA public CASCADE; CREATE SCHEMA public;")
			.execute(self.pool)
			.await?;
		self.ensure_table().await
	}
}
