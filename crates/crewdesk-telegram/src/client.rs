//! Telegram Bot API client.

use serde::Deserialize;

use crewdesk_models::Task;

use crate::error::{TelegramError, TelegramResult};

const API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Deserialize)]
struct ApiResponse {
	ok: bool,
	#[serde(default)]
	description: Option<String>,
}

/// Client for one bot token.
pub struct TelegramClient {
	http: reqwest::Client,
	base_url: String,
	token: String,
}

impl TelegramClient {
	pub fn new(token: impl Into<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			base_url: API_BASE.to_string(),
			token: token.into(),
		}
	}

	/// Client against a non-default API base URL (used by tests).
	pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
		Self {
			http: reqwest::Client::new(),
			base_url: base_url.into(),
			token: token.into(),
		}
	}

	/// Send a plain text message to a chat.
	pub async fn send_message(&self, chat_id: &str, text: &str) -> TelegramResult<()> {
		let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
		let response = self
			.http
			.post(&url)
			.json(&serde_json::json!({
				"chat_id": chat_id,
				"text": text,
			}))
			.send()
			.await?;

		let body: ApiResponse = response.json().await?;
		if !body.ok {
			let description = body
				.description
				.unwrap_or_else(|| "no description".to_string());
			tracing::warn!(%chat_id, %description, "telegram send failed");
			return Err(TelegramError::Api { description });
		}

		Ok(())
	}

	/// Send a formatted task notification.
	pub async fn send_task(&self, chat_id: &str, task: &Task) -> TelegramResult<()> {
		self.send_message(chat_id, &format_task(task)).await
	}
}

/// Render a task into the notification message body.
fn format_task(task: &Task) -> String {
	format!(
		"Task: {}\nDescription: {}\nStatus: {}\nPriority: {}",
		task.title,
		task.description.as_deref().unwrap_or("-"),
		task.status,
		task.priority
	)
}
