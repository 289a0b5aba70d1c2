use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;

use dolgobot::core::{config, init_logger, log_sheets_configuration, Config};
use dolgobot::dispatch;
use dolgobot::sheets::SheetsClient;
use dolgobot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Reads configuration, validates the bot token and starts long polling.
/// A missing token is a configuration error, not a crash: the process logs
/// it and returns without entering the event loop.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(config::LOG_FILE_PATH)?;

    let config = Arc::new(Config::from_env());

    if let Err(e) = config.require_token() {
        log::error!("❌ Токен бота не найден! ({})", e);
        println!("Добавьте TELEGRAM_TOKEN в переменные окружения");
        return Ok(());
    }

    if config.google_api_key.is_none() {
        log::warn!("⚠️ GOOGLE_API_KEY не настроен");
    }
    if config.spreadsheet_id.is_none() {
        log::warn!("⚠️ SPREADSHEET_ID не настроен");
    }

    log_sheets_configuration(&config);

    run_bot(config).await
}

/// Build the dispatcher stack and run long polling until shutdown
async fn run_bot(config: Arc<Config>) -> Result<()> {
    log::info!("🤖 Бот запускается с Google Sheets поддержкой...");

    let bot = create_bot(&config)?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let ledger = Arc::new(SheetsClient::new(&config));
    let dispatcher = Arc::new(dispatch::Dispatcher::new(Arc::clone(&config), ledger));
    let deps = HandlerDeps::new(dispatcher);

    println!("==================================================");
    println!("Бот запущен!");
    println!("Админы: {} человек", config.admin_ids.len());
    println!(
        "Google API ключ: {}",
        if config.google_api_key.is_some() { "Есть" } else { "Нет" }
    );
    println!(
        "ID таблицы: {}...",
        config
            .spreadsheet_id
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(20)
            .collect::<String>()
    );
    println!("==================================================");

    Dispatcher::builder(bot, schema(deps))
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
