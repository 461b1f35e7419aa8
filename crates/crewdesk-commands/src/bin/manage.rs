//! The `manage` entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crewdesk_commands::{Cli, execute};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();

	let default_level = match cli.verbosity {
		0 => "info",
		1 => "debug",
		_ => "trace",
	};
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| EnvFilter::new(default_level)),
		)
		.init();

	if let Err(error) = execute(cli).await {
		tracing::error!("{:#}", error);
		std::process::exit(1);
	}
}
