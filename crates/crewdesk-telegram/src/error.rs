//! Error types for the Telegram client.

use thiserror::Error;

/// Errors from the Telegram Bot API integration.
#[derive(Debug, Error)]
pub enum TelegramError {
	/// Transport-level failure.
	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	/// The API answered with ok=false.
	#[error("Telegram API error: {description}")]
	Api {
		/// Description field from the API response.
		description: String,
	},
}

/// Result type alias for Telegram operations.
pub type TelegramResult<T> = Result<T, TelegramError>;
