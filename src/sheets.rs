//! Ledger source: Google Sheets client stub
//!
//! Stands in for the future spreadsheet-backed debt ledger. The trait is the
//! seam where the real client will plug in later; the current implementation
//! performs no network I/O and answers synchronously from configuration and
//! a fixed fixture.

use crate::core::config::Config;

/// One row of the debt ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Purchase date, `DD.MM.YYYY`
    pub date: String,
    /// Employee full name
    pub employee: String,
    /// What was bought
    pub items: String,
    /// Amount in rubles
    pub amount: i64,
}

impl LedgerEntry {
    fn new(date: &str, employee: &str, items: &str, amount: i64) -> Self {
        Self {
            date: date.to_string(),
            employee: employee.to_string(),
            items: items.to_string(),
            amount,
        }
    }
}

/// Result of a ledger availability check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    /// Whether the ledger can be reached (i.e. configuration is complete)
    pub ok: bool,
    /// Human-readable status shown to the user
    pub message: String,
}

/// Capability contract for the debt ledger backend.
///
/// Kept synchronous on purpose: the stub answers instantly. Widening this
/// to a fallible async call is the first step once real spreadsheet I/O
/// lands.
pub trait LedgerSource: Send + Sync {
    /// Report whether the ledger is reachable and a status message.
    ///
    /// `ok` is `false` whenever required configuration (API key or
    /// spreadsheet id) is absent.
    fn check_availability(&self) -> Availability;

    /// Return the most recent ledger entries, oldest first.
    ///
    /// The stub returns the same 3-row fixture on every call.
    fn list_recent_entries(&self) -> Vec<LedgerEntry>;
}

/// Simplified Google Sheets client (stub)
#[derive(Debug, Clone)]
pub struct SheetsClient {
    api_key: Option<String>,
    spreadsheet_id: Option<String>,
}

impl SheetsClient {
    /// Build the client from process configuration
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.google_api_key.clone(),
            spreadsheet_id: config.spreadsheet_id.clone(),
        }
    }
}

impl LedgerSource for SheetsClient {
    fn check_availability(&self) -> Availability {
        if self.api_key.is_none() || self.spreadsheet_id.is_none() {
            return Availability {
                ok: false,
                message: "❌ Не настроены API ключи".to_string(),
            };
        }

        // Real connection goes here; for now the configured case reports success
        Availability {
            ok: true,
            message: "✅ Подключение к Google Sheets установлено".to_string(),
        }
    }

    fn list_recent_entries(&self) -> Vec<LedgerEntry> {
        vec![
            LedgerEntry::new("01.01.2024", "Иванов Иван", "Кофе, печенье", 150),
            LedgerEntry::new("02.01.2024", "Петров Петр", "Чай, бутерброд", 100),
            LedgerEntry::new("03.01.2024", "Сидоров Сидор", "Вода", 50),
        ]
    }
}
