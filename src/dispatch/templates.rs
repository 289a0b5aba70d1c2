//! Response templates
//!
//! Every template is a pure function from (role, data snapshot) to text, so
//! rendering can be tested without a bot instance. Time-bearing templates
//! take the timestamp as an argument instead of reading the clock.
//!
//! Texts use Telegram's legacy Markdown flavor; the greeting is plain text.

use chrono::{DateTime, Local};

use crate::core::config::Config;
use crate::dispatch::Role;
use crate::sheets::{Availability, LedgerEntry};

/// Greeting shown on /start and /help: role label, ledger status, prompt
pub fn greeting(role: Role, availability_message: &str) -> String {
    format!("{}\n{}\n\nВыберите действие:", role.label(), availability_message)
}

/// Fixed denial text for unknown action ids and role mismatches
pub fn access_denied() -> String {
    "⛔ У вас нет доступа к этой функции".to_string()
}

/// Help screen listing the current and planned functions
pub fn help_text() -> String {
    "📖 **Справка по боту учета долгов**\n\n\
     Текущие функции:\n\
     • 📊 Проверить подключение - тест Google Sheets\n\
     • 👥 Тестовые данные - пример данных из таблицы\n\
     • 👤 Мой статус - информация о вашем аккаунте\n\n\
     Следующий этап:\n\
     • Подключение к реальной Google таблице\n\
     • Расчет долгов сотрудников\n\
     • Уведомления о долгах\n\n\
     Версия 2.0 (Google Sheets тест)"
        .to_string()
}

/// Connection check report for admins.
///
/// On success lists the verified settings; on failure lists what to check
/// in the deployment environment.
pub fn connection_report(config: &Config, availability: &Availability) -> String {
    if availability.ok {
        let spreadsheet_prefix = config
            .spreadsheet_id
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(20)
            .collect::<String>();

        format!(
            "{}\n\n\
             ✅ **Настройки проверены:**\n\
             • API ключ: {}\n\
             • ID таблицы: {}...\n\
             • Админы: {} человек\n\n\
             Готово к подключению к реальной таблице!",
            availability.message,
            if config.google_api_key.is_some() { "Установлен" } else { "Отсутствует" },
            spreadsheet_prefix,
            config.admin_ids.len(),
        )
    } else {
        format!(
            "{}\n\n\
             **Что проверить:**\n\
             1. Добавлен ли GOOGLE_API_KEY в переменные окружения?\n\
             2. Добавлен ли SPREADSHEET_ID в переменные окружения?\n\
             3. Правильный ли ID таблицы?",
            availability.message,
        )
    }
}

/// Sample ledger listing with the per-entry breakdown and the total.
///
/// The total is the sum of `amount` over the snapshot, entries rendered in
/// their original order. An empty snapshot (ledger unavailable) renders a
/// placeholder line instead of failing.
pub fn sample_ledger(entries: &[LedgerEntry]) -> String {
    let mut text = String::from("📋 **Тестовые данные из Google Sheets:**\n\n");

    if entries.is_empty() {
        text.push_str("⚠️ Данные временно недоступны. Проверь настройки подключения и попробуй ещё раз.");
        return text;
    }

    let mut total = 0i64;
    for entry in entries {
        text.push_str(&format!(
            "📅 {}\n   👤 {}\n   🛒 {}\n   💰 {} ₽\n\n",
            entry.date, entry.employee, entry.items, entry.amount
        ));
        total += entry.amount;
    }

    text.push_str(&format!(
        "💵 **Общая сумма:** {} ₽\n\n\
         Это пример данных. Реальные данные будут загружаться из вашей таблицы.",
        total
    ));
    text
}

/// Account status: id, role, ledger connectivity, current date and the
/// functions available to the role
pub fn status(user_id: u64, role: Role, sheets_connected: bool, now: DateTime<Local>) -> String {
    let functions = match role {
        Role::Admin => "• Управление долгами\n• Просмотр всех сотрудников\n• Настройки бота\n",
        Role::Employee => "• Просмотр своего долга\n• История покупок\n• Уведомления\n",
    };

    format!(
        "👤 **Ваш статус:**\n\n\
         • ID: {}\n\
         • Роль: {}\n\
         • Google Sheets: {}\n\
         • Дата: {}\n\n\
         **Доступные функции:**\n{}",
        user_id,
        role.label(),
        if sheets_connected { "✅ Подключено" } else { "⚠️ В разработке" },
        now.format("%d.%m.%Y %H:%M"),
        functions,
    )
}

/// Personal debt screen (placeholder until the real ledger lands)
pub fn my_debt() -> String {
    "📊 **Ваш текущий долг:**\n\n\
     Функция в активной разработке.\n\n\
     **Скоро здесь будет:**\n\
     • Общая сумма долга\n\
     • История операций\n\
     • График погашения\n\n\
     А пока вы можете:\n\
     1. Проверить статус подключения\n\
     2. Посмотреть пример данных\n\
     3. Обратиться к администратору"
        .to_string()
}

/// Per-day debt screen (placeholder until the real ledger lands)
pub fn daily_debt(now: DateTime<Local>) -> String {
    format!(
        "📅 **Долг за день:**\n\n\
         Функция в активной разработке.\n\n\
         **Скоро здесь будет:**\n\
         • Выбор даты\n\
         • Список покупок за день\n\
         • Сумма за день\n\n\
         Сегодня: {}",
        now.format("%d.%m.%Y"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::parse_admin_ids;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn entry(date: &str, employee: &str, items: &str, amount: i64) -> LedgerEntry {
        LedgerEntry {
            date: date.to_string(),
            employee: employee.to_string(),
            items: items.to_string(),
            amount,
        }
    }

    #[test]
    fn sample_ledger_sums_amounts() {
        let entries = vec![
            entry("01.01.2024", "Иванов Иван", "Кофе, печенье", 150),
            entry("02.01.2024", "Петров Петр", "Чай, бутерброд", 100),
            entry("03.01.2024", "Сидоров Сидор", "Вода", 50),
        ];

        let text = sample_ledger(&entries);
        assert!(text.contains("**Общая сумма:** 300 ₽"));
    }

    #[test]
    fn sample_ledger_keeps_entry_order() {
        let entries = vec![
            entry("01.01.2024", "Иванов Иван", "Кофе", 150),
            entry("02.01.2024", "Петров Петр", "Чай", 100),
        ];

        let text = sample_ledger(&entries);
        let first = text.find("Иванов Иван").unwrap();
        let second = text.find("Петров Петр").unwrap();
        assert!(first < second);
    }

    #[test]
    fn sample_ledger_degrades_on_empty_snapshot() {
        let text = sample_ledger(&[]);
        assert!(text.contains("временно недоступны"));
        assert!(!text.contains("Общая сумма"));
    }

    #[test]
    fn greeting_carries_role_label_and_status() {
        let text = greeting(Role::Admin, "✅ Подключение к Google Sheets установлено");
        assert!(text.starts_with("👑 Администратор\n"));
        assert!(text.contains("установлено"));
        assert!(text.ends_with("Выберите действие:"));
    }

    #[test]
    fn status_formats_timestamp() {
        let now = Local.with_ymd_and_hms(2024, 1, 3, 9, 5, 0).unwrap();
        let text = status(283883536, Role::Admin, false, now);
        assert!(text.contains("• ID: 283883536"));
        assert!(text.contains("👑 Администратор"));
        assert!(text.contains("⚠️ В разработке"));
        assert!(text.contains("03.01.2024 09:05"));
        assert!(text.contains("Управление долгами"));
    }

    #[test]
    fn connection_report_lists_checks_when_degraded() {
        let config = Config {
            bot_token: "token".to_string(),
            google_api_key: None,
            spreadsheet_id: None,
            admin_ids: parse_admin_ids("283883536,222222222"),
        };
        let availability = Availability {
            ok: false,
            message: "❌ Не настроены API ключи".to_string(),
        };

        let text = connection_report(&config, &availability);
        assert!(text.starts_with("❌ Не настроены API ключи"));
        assert!(text.contains("GOOGLE_API_KEY"));
        assert!(text.contains("SPREADSHEET_ID"));
    }

    #[test]
    fn connection_report_truncates_spreadsheet_id() {
        let config = Config {
            bot_token: "token".to_string(),
            google_api_key: Some("key".to_string()),
            spreadsheet_id: Some("19iUX_rF9jpsDv9p5V_nj9dapOO6zUR5GDzy9o5GGoI8".to_string()),
            admin_ids: parse_admin_ids("283883536,222222222"),
        };
        let availability = Availability {
            ok: true,
            message: "✅ Подключение к Google Sheets установлено".to_string(),
        };

        let text = connection_report(&config, &availability);
        assert!(text.contains("• ID таблицы: 19iUX_rF9jpsDv9p5V_n..."));
        assert!(text.contains("• Админы: 2 человек"));
    }
}
