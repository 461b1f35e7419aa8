//! Environment-driven configuration for the crewdesk backend.
//!
//! All runtime configuration comes from process environment variables,
//! read once at startup into a [`Settings`] value that is passed down
//! explicitly; there is no global settings singleton.

pub mod env;
pub mod error;
pub mod settings;

pub use env::Env;
pub use error::{ConfError, ConfResult};
pub use settings::{DatabaseSettings, OnResetFailure, Settings, TelegramSettings};
