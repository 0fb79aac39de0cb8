use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use prizebot::cli::{self, Cli, Commands};
use prizebot::core::{config, init_logger, log_admin_configuration};
use prizebot::storage::create_pool;
use prizebot::telegram::{create_bot, schema, setup_bot_commands, AccessConfig, HandlerDeps};

/// Entry point: parses the command line and runs the requested command.
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    match cli.command {
        Some(Commands::CreatePrize { label, database }) => {
            let database = database.unwrap_or_else(|| config::DATABASE_PATH.clone());
            let created = cli::create_prize(&database, &label)?;
            println!("{}", serde_json::to_string(&created)?);
            Ok(())
        }
        Some(Commands::Run) | None => {
            init_logger(&config::LOG_FILE_PATH)?;
            run_bot().await
        }
    }
}

/// Starts long polling with a sequential dispatcher.
async fn run_bot() -> Result<()> {
    log::info!("Starting prizebot...");

    let db_pool = Arc::new(
        create_pool(&config::DATABASE_PATH).map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?,
    );

    let bot = create_bot()?;
    let me = bot.get_me().await?;
    log::info!("Bot username: @{}", me.username());

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let access = AccessConfig::from_env();
    log_admin_configuration(access.admin_id, access.developer_id, access.admin_chat_id);

    let deps = HandlerDeps::new(db_pool, access, me.user.username.clone());

    Dispatcher::builder(bot, schema(deps))
        // One update at a time, in arrival order
        .distribution_function(|_: &Update| Some(()))
        .enable_ctrlc_handler()
        .error_handler(LoggingErrorHandler::with_custom_text("An error from a handler"))
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
