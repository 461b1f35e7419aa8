//! Migration scaffolding for the `makemigration` command.
//!
//! Builtin migrations are embedded in the binary; scaffolding writes a
//! numbered SQL file for the developer to fill in and embed into the
//! chain.

use std::fs;
use std::path::{Path, PathBuf};

use super::{MigrationError, Result, builtin};

/// Create a new, empty migration file under `dir`.
///
/// The file is numbered after the highest existing number across the
/// builtin chain and any files already in `dir`.
pub fn create_migration(dir: &Path, message: &str) -> Result<PathBuf> {
	let slug = slugify(message);
	if slug.is_empty() {
		return Err(MigrationError::InvalidName(message.to_string()));
	}

	fs::create_dir_all(dir)?;
	let number = next_number(dir)?;
	let path = dir.join(format!("{:04}_{}.sql", number, slug));

	let content = format!(
		"-- Migration: {}\n--\n-- Statements run in order inside one transaction.\n-- Embed this file into the builtin chain before deploying.\n\n",
		message
	);
	fs::write(&path, content)?;

	tracing::info!(path = %path.display(), "created migration");
	Ok(path)
}

/// Lowercase the message and replace runs of non-alphanumerics with `_`.
fn slugify(message: &str) -> String {
	let mut slug = String::with_capacity(message.len());
	let mut last_was_sep = true;
	for c in message.chars() {
		if c.is_ascii_alphanumeric() {
			slug.push(c.to_ascii_lowercase());
			last_was_sep = false;
		} else if !last_was_sep {
			slug.push('_');
			last_was_sep = true;
		}
	}
	slug.trim_end_matches('_').to_string()
}

fn next_number(dir: &Path) -> Result<u32> {
	let mut max = builtin::migrations()
		.iter()
		.filter_map(|m| leading_number(m.name))
		.max()
		.unwrap_or(0);

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		if let Some(name) = entry.file_name().to_str() {
			if let Some(number) = leading_number(name) {
				max = max.max(number);
			}
		}
	}

	Ok(max + 1)
}

fn leading_number(name: &str) -> Option<u32> {
	name.split('_').next()?.parse().ok()
}
