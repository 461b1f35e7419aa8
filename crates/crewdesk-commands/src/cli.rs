//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Crewdesk management interface.
#[derive(Debug, Parser)]
#[command(name = "manage")]
#[command(about = "Crewdesk database management", long_about = None)]
#[command(version)]
pub struct Cli {
	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Commands,

	/// Verbosity level (can be repeated for more output).
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbosity: u8,
}

/// Available management commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
	/// Scaffold a new migration file.
	Makemigration {
		/// Migration message; becomes the file name slug.
		#[arg(short, long)]
		message: String,

		/// Directory migration files are written to.
		#[arg(long, default_value = "migrations")]
		dir: PathBuf,
	},

	/// Reconcile revision state and apply pending migrations.
	Migrate {
		/// Show the migration plan without applying it.
		#[arg(long)]
		plan: bool,
	},

	/// Seed the database from a YAML document or generated data.
	Seed {
		/// Seed document path; defaults to the configured seed path.
		#[arg(long)]
		path: Option<PathBuf>,

		/// Generate fake records instead of reading a document.
		#[arg(long)]
		auto: bool,

		/// Records per model when generating.
		#[arg(long, default_value_t = 3)]
		records: usize,

		/// Generate even for models whose tables already contain rows.
		#[arg(long)]
		force: bool,
	},

	/// Makemigration, migrate and seed in sequence.
	Bootstrap {
		/// Migration message for the scaffolded file.
		#[arg(short, long)]
		message: String,

		/// Directory migration files are written to.
		#[arg(long, default_value = "migrations")]
		dir: PathBuf,
	},
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_parse_migrate() {
		let cli = Cli::try_parse_from(["manage", "migrate"]).unwrap();
		assert!(matches!(cli.command, Commands::Migrate { plan: false }));
	}

	#[rstest]
	fn test_parse_migrate_plan() {
		let cli = Cli::try_parse_from(["manage", "migrate", "--plan"]).unwrap();
		assert!(matches!(cli.command, Commands::Migrate { plan: true }));
	}

	#[rstest]
	fn test_parse_makemigration() {
		let cli =
			Cli::try_parse_from(["manage", "makemigration", "--message", "add labels"]).unwrap();
		let Commands::Makemigration { message, dir } = cli.command else {
			panic!("expected makemigration");
		};
		assert_eq!(message, "add labels");
		assert_eq!(dir, PathBuf::from("migrations"));
	}

	#[rstest]
	fn test_parse_seed_defaults() {
		let cli = Cli::try_parse_from(["manage", "seed"]).unwrap();
		let Commands::Seed {
			path,
			auto,
			records,
			force,
		} = cli.command
		else {
			panic!("expected seed");
		};
		assert!(path.is_none());
		assert!(!auto);
		assert_eq!(records, 3);
		assert!(!force);
	}

	#[rstest]
	fn test_parse_seed_auto() {
		let cli =
			Cli::try_parse_from(["manage", "seed", "--auto", "--records", "5", "--force"])
				.unwrap();
		let Commands::Seed {
			auto,
			records,
			force,
			..
		} = cli.command
		else {
			panic!("expected seed");
		};
		assert!(auto);
		assert_eq!(records, 5);
		assert!(force);
	}

	#[rstest]
	fn test_makemigration_requires_message() {
		assert!(Cli::try_parse_from(["manage", "makemigration"]).is_err());
	}

	#[rstest]
	fn test_verbosity_counts() {
		let cli = Cli::try_parse_from(["manage", "-vv", "migrate"]).unwrap();
		assert_eq!(cli.verbosity, 2);
	}
}
