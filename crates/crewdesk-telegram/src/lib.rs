//! Thin Telegram Bot API client.
//!
//! Sends task notifications through `sendMessage`. This is a best-effort
//! side channel: callers log failures and move on, nothing in the seeding
//! or migration paths depends on delivery.

pub mod client;
pub mod error;

pub use client::TelegramClient;
pub use error::{TelegramError, TelegramResult};
