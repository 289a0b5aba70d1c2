//! Runtime configuration
//!
//! All settings are read from environment variables exactly once, at process
//! start, into an explicit [`Config`] struct that gets passed into the
//! dispatcher by reference. Nothing in the rest of the codebase reads the
//! environment directly.

use std::collections::HashSet;
use std::env;

use crate::core::error::{AppError, AppResult};

/// Path of the log file created next to the binary
pub const LOG_FILE_PATH: &str = "dolgobot.log";

/// Fallback admin allow-list used when `ADMIN_IDS` is unset
///
/// Two sample identifiers carried over from the original deployment so the
/// bot is usable out of the box on a fresh environment.
pub const DEFAULT_ADMIN_IDS: &str = "283883536,222222222";

/// Immutable process-wide configuration
///
/// Constructed once via [`Config::from_env`] and shared through an `Arc`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token (`TELEGRAM_TOKEN`). Required; the process refuses
    /// to start when it is empty.
    pub bot_token: String,
    /// Google API key (`GOOGLE_API_KEY`). Optional; absence degrades the
    /// ledger source to unavailable.
    pub google_api_key: Option<String>,
    /// Google spreadsheet identifier (`SPREADSHEET_ID`). Optional; same
    /// effect as a missing API key.
    pub spreadsheet_id: Option<String>,
    /// Numeric Telegram user ids allowed to use admin actions
    /// (`ADMIN_IDS`, comma-separated).
    pub admin_ids: HashSet<u64>,
}

impl Config {
    /// Read the full configuration from the environment.
    ///
    /// Never fails: missing optional values become `None`, a missing
    /// `ADMIN_IDS` falls back to [`DEFAULT_ADMIN_IDS`]. Validation of the
    /// required token happens in `main`, where a missing token stops the
    /// process before the event loop starts.
    pub fn from_env() -> Self {
        let admin_raw = env::var("ADMIN_IDS").unwrap_or_else(|_| DEFAULT_ADMIN_IDS.to_string());

        Self {
            bot_token: env::var("TELEGRAM_TOKEN").unwrap_or_default(),
            google_api_key: non_empty(env::var("GOOGLE_API_KEY").ok()),
            spreadsheet_id: non_empty(env::var("SPREADSHEET_ID").ok()),
            admin_ids: parse_admin_ids(&admin_raw),
        }
    }

    /// Allow-list membership test for the caller's numeric id
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// Fail with a configuration error when the bot token is missing
    pub fn require_token(&self) -> AppResult<()> {
        if self.bot_token.is_empty() {
            return Err(AppError::Config("TELEGRAM_TOKEN не задан".to_string()));
        }
        Ok(())
    }
}

/// Parse a comma-separated admin id list into a set.
///
/// Entries that are not valid numeric ids are skipped with a warning rather
/// than failing startup.
pub fn parse_admin_ids(raw: &str) -> HashSet<u64> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.parse::<u64>() {
            Ok(id) => Some(id),
            Err(_) => {
                log::warn!("Skipping malformed admin id in ADMIN_IDS: {:?}", part);
                None
            }
        })
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
