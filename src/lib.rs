//! Dolgobot - Telegram bot for tracking employee debts against a Google
//! Sheets ledger
//!
//! The functional core is a role-gated command/response dispatcher: an
//! inbound event (command or button press) is mapped to exactly one
//! outbound response, gated by an admin allow-list. The Google Sheets
//! client is a deterministic stub until the real spreadsheet integration
//! lands.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging
//! - `sheets`: ledger source stub (future Google Sheets client)
//! - `dispatch`: roles, the menu action table, response templates
//! - `telegram`: teloxide integration and handlers

pub mod core;
pub mod dispatch;
pub mod sheets;
pub mod telegram;

// Re-export commonly used types for convenience
pub use self::core::{config, AppError, AppResult, Config};
pub use dispatch::{Dispatcher, MenuAction, Reply, Role};
pub use sheets::{LedgerSource, SheetsClient};
