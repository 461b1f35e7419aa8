//! # Crewdesk
//!
//! CRUD backend core for users, tasks and organisational hierarchy on a
//! Supabase-hosted PostgreSQL database.
//!
//! The crate is a facade over the workspace members:
//!
//! - [`conf`]: environment-driven settings
//! - [`models`]: model descriptors and domain row types
//! - [`db`]: connection layer, schema migrations, reconciler and CRUD
//! - [`seeding`]: dependency-ordered YAML and auto-generated seeding
//! - [`telegram`]: task notification client
//! - [`commands`]: the `manage` CLI
//!
//! ## Typical flow
//!
//! Reconciliation runs first (the recorded revision state must be
//! consistent before migrations apply), migrations execute, then seeding
//! runs against the migrated schema:
//!
//! ```ignore
//! use crewdesk::conf::Settings;
//! use crewdesk::db::SupabaseDatabase;
//! use crewdesk::db::migrations::{MigrationRunner, Reconciler};
//! use crewdesk::seeding::{SeedDocument, Seeder};
//!
//! let settings = Settings::from_env()?;
//! let db = SupabaseDatabase::connect(&settings.database).await?;
//!
//! Reconciler::new(db.pool(), &settings.database).reconcile().await?;
//! MigrationRunner::new(db.pool()).migrate().await?;
//!
//! let document = SeedDocument::from_path("seeds/seed.yaml".as_ref())?;
//! Seeder::new(db.pool()).seed(&document).await?;
//! db.close().await;
//! ```

pub use crewdesk_commands as commands;
pub use crewdesk_conf as conf;
pub use crewdesk_db as db;
pub use crewdesk_models as models;
pub use crewdesk_seeding as seeding;
pub use crewdesk_telegram as telegram;

pub use crewdesk_conf::Settings;
pub use crewdesk_db::SupabaseDatabase;
pub use crewdesk_seeding::{SeedDocument, Seeder};
pub use crewdesk_telegram::TelegramClient;
