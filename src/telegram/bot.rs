//! Bot initialization and command definitions

use std::time::Duration;

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config::Config;

/// Request timeout for Bot API calls (in seconds)
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Bot commands enum with descriptions
///
/// /help deliberately shows the same role-gated menu as /start.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Я умею:")]
pub enum Command {
    #[command(description = "показывает главное меню")]
    Start,
    #[command(description = "показывает главное меню")]
    Help,
}

/// Creates a Bot instance from the configured token with a timeout-configured client
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to build the HTTP client
pub fn create_bot(config: &Config) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    Ok(Bot::with_client(config.bot_token.clone(), client))
}

/// Sets up bot commands in the Telegram UI
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    use teloxide::types::BotCommand;

    bot.set_my_commands(vec![
        BotCommand::new("start", "показывает главное меню"),
        BotCommand::new("help", "показывает главное меню"),
    ])
    .await?;

    Ok(())
}
