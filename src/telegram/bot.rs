//! Bot initialization and command parsing

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

use crate::core::{config, AppError, AppResult};

/// Commands the bot understands.
///
/// Only `/start` is advertised in the Telegram UI; `/info` and `/mail`
/// are for staff.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "получить приз по коду")]
    Start(String),
    #[command(description = "список пользователей (только для администратора)")]
    Info,
    #[command(description = "рассылка всем пользователям (только для администратора)")]
    Mail,
}

/// Parses a message text as a bot command.
///
/// `bot_username` lets `/info@this_bot` through while commands addressed
/// to other bots in a group are rejected.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<Command> {
    Command::parse(text, bot_username.unwrap_or_default()).ok()
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(AppError)` - Missing token, invalid URL or HTTP client failure
pub fn create_bot() -> AppResult<Bot> {
    if config::BOT_TOKEN.is_empty() {
        return Err(AppError::Config("BOT_TOKEN is not set".to_string()));
    }

    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(config::BOT_TOKEN.as_str(), client);

    let bot = match config::BOT_API_URL.as_deref() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            bot.set_api_url(url::Url::parse(bot_api_url)?)
        }
        None => bot,
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(vec![BotCommand::new("start", "получить приз по коду")])
        .await?;

    Ok(())
}
