//! Telegram bot integration and handlers

pub mod bot;
pub mod copy;
pub mod handlers;
pub mod sink;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, AccessConfig, HandlerDeps, HandlerError};
