//! Command implementations.
//!
//! Reconciliation always runs before migrations apply; seeding runs
//! against the migrated schema. The database pool is connected per command
//! and closed on the way out.

use std::path::{Path, PathBuf};

use crewdesk_conf::Settings;
use crewdesk_db::migrations::{MigrationRunner, Reconciler, create_migration};
use crewdesk_db::{SupabaseDatabase, crud};
use crewdesk_seeding::{AutoSeeder, SeedDocument, SeedReport, Seeder};
use crewdesk_telegram::TelegramClient;

use crate::cli::{Cli, Commands};

/// Execute the parsed command line.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
	match cli.command {
		Commands::Makemigration { message, dir } => makemigration(&dir, &message),
		Commands::Migrate { plan } => migrate(plan).await,
		Commands::Seed {
			path,
			auto,
			records,
			force,
		} => seed(path, auto, records, force).await,
		Commands::Bootstrap { message, dir } => {
			makemigration(&dir, &message)?;
			migrate(false).await?;
			seed(None, false, 0, false).await
		}
	}
}

fn makemigration(dir: &Path, message: &str) -> anyhow::Result<()> {
	let path = create_migration(dir, message)?;
	println!("Created migration {}", path.display());
	Ok(())
}

async fn migrate(plan_only: bool) -> anyhow::Result<()> {
	let settings = Settings::from_env()?;
	let db = SupabaseDatabase::connect(&settings.database).await?;
	let result = run_migrations(&db, &settings, plan_only).await;
	db.close().await;
	result
}

async fn run_migrations(
	db: &SupabaseDatabase,
	settings: &Settings,
	plan_only: bool,
) -> anyhow::Result<()> {
	let runner = MigrationRunner::new(db.pool());

	if plan_only {
		let pending = runner.plan().await?;
		if pending.is_empty() {
			println!("No migrations to apply");
		} else {
			println!("Would apply {} migration(s):", pending.len());
			for name in &pending {
				println!("  {}", name);
			}
		}
		return Ok(());
	}

	let reconciler = Reconciler::new(db.pool(), &settings.database);
	let state = reconciler.reconcile().await?;
	tracing::debug!(?state, "revision state after reconciliation");

	let report = runner.migrate().await?;
	if report.applied.is_empty() {
		println!("No migrations to apply");
	} else {
		println!("Applied {} migration(s):", report.applied.len());
		for name in &report.applied {
			println!("  {}", name);
		}
	}
	Ok(())
}

async fn seed(
	path: Option<PathBuf>,
	auto: bool,
	records: usize,
	force: bool,
) -> anyhow::Result<()> {
	let settings = Settings::from_env()?;
	let db = SupabaseDatabase::connect(&settings.database).await?;
	let result = run_seed(&db, &settings, path, auto, records, force).await;
	db.close().await;
	result
}

async fn run_seed(
	db: &SupabaseDatabase,
	settings: &Settings,
	path: Option<PathBuf>,
	auto: bool,
	records: usize,
	force: bool,
) -> anyhow::Result<()> {
	crud::init_db(db.pool(), settings).await?;

	let report = if auto {
		AutoSeeder::new(db.pool()).seed(records, force).await?
	} else {
		let path = path.unwrap_or_else(|| PathBuf::from(&settings.seed_path));
		let document = SeedDocument::from_path(&path)?;
		Seeder::new(db.pool()).seed(&document).await?
	};

	println!(
		"Seeded {} record(s), skipped {} existing",
		report.inserted, report.skipped
	);
	notify(settings, &report).await;
	Ok(())
}

/// Best-effort Telegram notification; failures are logged, never fatal.
async fn notify(settings: &Settings, report: &SeedReport) {
	let (Some(token), Some(chat_id)) = (
		settings.telegram.bot_token.as_deref(),
		settings.telegram.chat_id.as_deref(),
	) else {
		return;
	};

	let client = TelegramClient::new(token);
	let message = format!(
		"Seeding finished: {} inserted, {} skipped",
		report.inserted, report.skipped
	);
	if let Err(error) = client.send_message(chat_id, &message).await {
		tracing::warn!(%error, "seed notification failed");
	}
}
