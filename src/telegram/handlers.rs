//! Dispatcher schema and handler endpoints
//!
//! Adapts the platform-agnostic [`Dispatcher`] to teloxide: commands become
//! `handle_start`, callback queries become `handle_action`, and replies are
//! converted to messages with inline keyboards. The same schema is used in
//! production and in tests.

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};

use crate::core::error::AppError;
use crate::dispatch::{Dispatcher, Reply};
use crate::telegram::bot::Command;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub dispatcher: Arc<Dispatcher>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

/// Creates the main dispatcher schema for the Telegram bot.
///
/// This function returns a handler tree that can be used with teloxide's
/// Dispatcher. The same schema is used in production and in integration
/// tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(callback_handler(deps_callback))
}

/// Handler for /start and /help commands
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);

                let caller_id = msg.from.as_ref().map(|u| u.id.0).unwrap_or(0);

                match cmd {
                    // /help renders the same role-gated menu as /start
                    Command::Start | Command::Help => {
                        let reply = deps.dispatcher.handle_start(caller_id);
                        bot.send_message(msg.chat.id, reply.text.clone())
                            .reply_markup(inline_keyboard(&reply))
                            .await?;
                    }
                }
                Ok(())
            }
        },
    ))
}

/// Handler for callback queries (inline keyboard buttons)
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            // Acknowledge unconditionally (even on the denied path) so the
            // client never shows an endless loading indicator
            if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
                log::warn!("Failed to answer callback query {:?}: {}", q.id, e);
            }

            let Some(data) = q.data else {
                log::warn!("Callback query {:?} without data", q.id);
                return Ok(());
            };

            let chat_id = q.message.as_ref().map(|m| m.chat().id);
            let message_id = q.message.as_ref().map(|m| m.id());
            let (Some(chat_id), Some(message_id)) = (chat_id, message_id) else {
                log::warn!("Callback query {:?} without an accessible message", q.id);
                return Ok(());
            };

            let caller_id = q.from.id.0;
            let reply = deps.dispatcher.handle_action(caller_id, &data);

            bot.edit_message_text(chat_id, message_id, reply.text.clone())
                .parse_mode(ParseMode::Markdown)
                .await
                .map_err(AppError::from)?;

            Ok(())
        }
    })
}

/// Convert a dispatcher reply's button grid to an inline keyboard
pub fn inline_keyboard(reply: &Reply) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        reply
            .keyboard
            .iter()
            .map(|row| row.iter().map(|b| cb(b.label, b.action_id)).collect::<Vec<_>>()),
    )
}

fn cb(label: impl Into<String>, data: impl Into<String>) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label.into(), data.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{parse_admin_ids, Config};
    use crate::sheets::SheetsClient;

    #[test]
    fn keyboard_preserves_labels_and_order() {
        let config = Arc::new(Config {
            bot_token: "token".to_string(),
            google_api_key: None,
            spreadsheet_id: None,
            admin_ids: parse_admin_ids("283883536"),
        });
        let dispatcher = Dispatcher::new(Arc::clone(&config), Arc::new(SheetsClient::new(&config)));

        let reply = dispatcher.handle_start(999);
        let keyboard = inline_keyboard(&reply);

        let labels: Vec<&str> = keyboard
            .inline_keyboard
            .iter()
            .flatten()
            .map(|button| button.text.as_str())
            .collect();
        assert_eq!(
            labels,
            vec!["📊 Мой долг", "📅 Долг за день", "👤 Мой статус", "ℹ️ Справка"]
        );
    }
}
