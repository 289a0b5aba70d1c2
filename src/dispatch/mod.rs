//! Role-gated command/response dispatcher
//!
//! Maps an inbound event (a /start command or an inline-button callback) to
//! exactly one outbound [`Reply`], enforcing per-action role restrictions.
//! The action table is a fixed tagged-variant enum: dispatch is one lookup
//! plus one role check, never a chain of string comparisons.
//!
//! The dispatcher is platform-agnostic and synchronous; the `telegram`
//! module adapts replies to the Bot API and owns all network effects.

pub mod templates;

use std::sync::Arc;

use chrono::Local;

use crate::core::config::Config;
use crate::sheets::LedgerSource;

/// Caller role, derived per event from the admin allow-list.
///
/// Never stored: recomputed from configuration on every inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    /// Display label with the role emoji
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "👑 Администратор",
            Role::Employee => "👤 Сотрудник",
        }
    }
}

/// Who may trigger a menu action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Admin,
    Employee,
    Any,
}

impl Audience {
    /// Whether a caller with `role` is allowed
    pub fn allows(self, role: Role) -> bool {
        match self {
            Audience::Any => true,
            Audience::Admin => role == Role::Admin,
            Audience::Employee => role == Role::Employee,
        }
    }
}

/// The fixed menu action table.
///
/// Declaration order in [`MenuAction::ALL`] is the menu order; a role's menu
/// is this table filtered by audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Google Sheets connection check (admin)
    CheckConnection,
    /// Sample ledger listing with the total (admin)
    TestData,
    /// Personal debt screen (employee)
    MyDebt,
    /// Per-day debt screen (employee)
    DailyDebt,
    /// Account status (anyone)
    MyStatus,
    /// Help screen (anyone)
    Help,
}

impl MenuAction {
    /// All actions in menu order
    pub const ALL: [MenuAction; 6] = [
        MenuAction::CheckConnection,
        MenuAction::TestData,
        MenuAction::MyDebt,
        MenuAction::DailyDebt,
        MenuAction::MyStatus,
        MenuAction::Help,
    ];

    /// Opaque action id carried in callback data
    pub fn id(self) -> &'static str {
        match self {
            MenuAction::CheckConnection => "check_connection",
            MenuAction::TestData => "test_data",
            MenuAction::MyDebt => "my_debt",
            MenuAction::DailyDebt => "daily_debt",
            MenuAction::MyStatus => "my_status",
            MenuAction::Help => "help",
        }
    }

    /// Reverse lookup from callback data. Unknown ids return `None` and are
    /// treated by the dispatcher as an access-denial case, not an error.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }

    /// Button label shown in the menu
    pub fn label(self) -> &'static str {
        match self {
            MenuAction::CheckConnection => "📊 Проверить подключение",
            MenuAction::TestData => "👥 Тестовые данные",
            MenuAction::MyDebt => "📊 Мой долг",
            MenuAction::DailyDebt => "📅 Долг за день",
            MenuAction::MyStatus => "👤 Мой статус",
            MenuAction::Help => "ℹ️ Справка",
        }
    }

    /// Role restriction for this action
    pub fn audience(self) -> Audience {
        match self {
            MenuAction::CheckConnection | MenuAction::TestData => Audience::Admin,
            MenuAction::MyDebt | MenuAction::DailyDebt => Audience::Employee,
            MenuAction::MyStatus | MenuAction::Help => Audience::Any,
        }
    }
}

/// One selectable button: label plus the opaque action id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuButton {
    pub label: &'static str,
    pub action_id: &'static str,
}

/// Outbound response: rendered text plus an optional button grid.
///
/// Platform-agnostic on purpose so the dispatcher stays testable without a
/// bot instance; the telegram layer converts the keyboard to inline buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Button rows, one button per row. Empty for message-replacing replies.
    pub keyboard: Vec<Vec<MenuButton>>,
}

impl Reply {
    fn text_only(text: String) -> Self {
        Self {
            text,
            keyboard: Vec::new(),
        }
    }
}

/// The dispatcher: owns the event → response mapping, gated by role
pub struct Dispatcher {
    config: Arc<Config>,
    ledger: Arc<dyn LedgerSource>,
}

impl Dispatcher {
    /// Build a dispatcher over the process configuration and a ledger source
    pub fn new(config: Arc<Config>, ledger: Arc<dyn LedgerSource>) -> Self {
        Self { config, ledger }
    }

    /// Compute the caller's role from the admin allow-list.
    ///
    /// The single role-computation point: every handler and template goes
    /// through here.
    pub fn role_of(&self, caller_id: u64) -> Role {
        if self.config.is_admin(caller_id) {
            Role::Admin
        } else {
            Role::Employee
        }
    }

    /// The ordered menu for a role: the action table filtered by audience.
    ///
    /// By construction every option in the returned menu permits the role.
    pub fn menu_for(role: Role) -> Vec<Vec<MenuButton>> {
        MenuAction::ALL
            .into_iter()
            .filter(|action| action.audience().allows(role))
            .map(|action| {
                vec![MenuButton {
                    label: action.label(),
                    action_id: action.id(),
                }]
            })
            .collect()
    }

    /// Handle /start (and /help): greeting plus the role's menu.
    ///
    /// The ledger availability status is reflected only in the greeting
    /// text; an unavailable ledger never suppresses the menu.
    pub fn handle_start(&self, caller_id: u64) -> Reply {
        let role = self.role_of(caller_id);
        let availability = self.ledger.check_availability();

        log::info!("/start from {} as {:?} (sheets ok: {})", caller_id, role, availability.ok);

        Reply {
            text: templates::greeting(role, &availability.message),
            keyboard: Self::menu_for(role),
        }
    }

    /// Handle a button press previously issued by [`Dispatcher::handle_start`].
    ///
    /// Unknown action ids and role mismatches both render the fixed denial
    /// template; the two cases are deliberately indistinguishable to the
    /// caller. Repeating the same action produces the same output, modulo
    /// time-of-day text.
    pub fn handle_action(&self, caller_id: u64, action_id: &str) -> Reply {
        let role = self.role_of(caller_id);

        let Some(action) = MenuAction::from_id(action_id) else {
            log::warn!("Unknown action {:?} from {}", action_id, caller_id);
            return Reply::text_only(templates::access_denied());
        };

        if !action.audience().allows(role) {
            log::warn!("Denied {:?} for {} ({:?})", action, caller_id, role);
            return Reply::text_only(templates::access_denied());
        }

        log::info!("Action {:?} from {} ({:?})", action, caller_id, role);
        Reply::text_only(self.render(action, caller_id, role))
    }

    fn render(&self, action: MenuAction, caller_id: u64, role: Role) -> String {
        match action {
            MenuAction::Help => templates::help_text(),
            MenuAction::CheckConnection => {
                templates::connection_report(&self.config, &self.ledger.check_availability())
            }
            MenuAction::TestData => {
                // Unavailable ledger renders the degraded placeholder, never an error
                let entries = if self.ledger.check_availability().ok {
                    self.ledger.list_recent_entries()
                } else {
                    Vec::new()
                };
                templates::sample_ledger(&entries)
            }
            MenuAction::MyStatus => {
                templates::status(caller_id, role, self.ledger.check_availability().ok, Local::now())
            }
            MenuAction::MyDebt => templates::my_debt(),
            MenuAction::DailyDebt => templates::daily_debt(Local::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::parse_admin_ids;
    use crate::sheets::SheetsClient;
    use pretty_assertions::assert_eq;

    fn dispatcher(admin_ids: &str, configured: bool) -> Dispatcher {
        let config = Arc::new(Config {
            bot_token: "token".to_string(),
            google_api_key: configured.then(|| "key".to_string()),
            spreadsheet_id: configured.then(|| "sheet-id".to_string()),
            admin_ids: parse_admin_ids(admin_ids),
        });
        let ledger = Arc::new(SheetsClient::new(&config));
        Dispatcher::new(config, ledger)
    }

    fn action_ids(reply: &Reply) -> Vec<&'static str> {
        reply
            .keyboard
            .iter()
            .flatten()
            .map(|button| button.action_id)
            .collect()
    }

    #[test]
    fn admin_gets_admin_menu() {
        let dispatcher = dispatcher("283883536", true);
        let reply = dispatcher.handle_start(283883536);

        assert_eq!(
            action_ids(&reply),
            vec!["check_connection", "test_data", "my_status", "help"]
        );
        assert!(reply.text.starts_with("👑 Администратор"));
    }

    #[test]
    fn employee_gets_employee_menu() {
        let dispatcher = dispatcher("283883536", true);
        let reply = dispatcher.handle_start(999);

        assert_eq!(action_ids(&reply), vec!["my_debt", "daily_debt", "my_status", "help"]);
        assert!(reply.text.starts_with("👤 Сотрудник"));
    }

    #[test]
    fn every_menu_option_permits_its_role() {
        for role in [Role::Admin, Role::Employee] {
            for button in Dispatcher::menu_for(role).into_iter().flatten() {
                let action = MenuAction::from_id(button.action_id).unwrap();
                assert!(action.audience().allows(role), "{:?} leaked into {:?} menu", action, role);
            }
        }
    }

    #[test]
    fn unknown_action_is_denied_for_any_caller() {
        let dispatcher = dispatcher("283883536", true);
        for caller in [283883536, 999] {
            let reply = dispatcher.handle_action(caller, "drop_tables");
            assert_eq!(reply.text, templates::access_denied());
            assert!(reply.keyboard.is_empty());
        }
    }

    #[test]
    fn role_mismatch_is_denied() {
        let dispatcher = dispatcher("283883536", true);

        // Employee pressing an admin-only action
        let reply = dispatcher.handle_action(999, "check_connection");
        assert_eq!(reply.text, templates::access_denied());

        // Admin pressing an employee-only action
        let reply = dispatcher.handle_action(283883536, "my_debt");
        assert_eq!(reply.text, templates::access_denied());
    }

    #[test]
    fn allowed_actions_render_their_template() {
        let dispatcher = dispatcher("283883536", true);

        let reply = dispatcher.handle_action(283883536, "test_data");
        assert!(reply.text.contains("**Общая сумма:** 300 ₽"));

        let reply = dispatcher.handle_action(999, "my_debt");
        assert!(reply.text.contains("Ваш текущий долг"));

        let reply = dispatcher.handle_action(999, "help");
        assert!(reply.text.contains("Справка по боту учета долгов"));
    }

    #[test]
    fn time_free_actions_are_idempotent() {
        let dispatcher = dispatcher("283883536", true);

        for (caller, action) in [(283883536, "test_data"), (283883536, "check_connection"), (999, "help")] {
            let first = dispatcher.handle_action(caller, action);
            let second = dispatcher.handle_action(caller, action);
            assert_eq!(first, second, "{} not idempotent", action);
        }
    }

    #[test]
    fn unavailable_ledger_still_yields_a_menu() {
        let dispatcher = dispatcher("283883536", false);
        let reply = dispatcher.handle_start(283883536);

        assert_eq!(reply.keyboard.len(), 4);
        assert!(reply.text.contains("❌ Не настроены API ключи"));
    }

    #[test]
    fn unavailable_ledger_degrades_test_data() {
        let dispatcher = dispatcher("283883536", false);
        let reply = dispatcher.handle_action(283883536, "test_data");

        assert!(reply.text.contains("временно недоступны"));
        assert!(!reply.text.contains("Общая сумма"));
    }

    #[test]
    fn action_id_round_trip() {
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::from_id(action.id()), Some(action));
        }
        assert_eq!(MenuAction::from_id(""), None);
        assert_eq!(MenuAction::from_id("CHECK_CONNECTION"), None);
    }
}
