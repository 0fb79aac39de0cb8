//! prizebot - Telegram bot for promotional prize codes
//!
//! People redeem a code by starting the bot with it and sharing their
//! phone number; staff look codes up and activate them from a group chat,
//! and administrators can mail every user.
//!
//! # Module Structure
//!
//! - `core`: configuration, code normalization, sessions, errors, logging
//! - `storage`: SQLite prize and user store
//! - `redemption`: claim and activation rules
//! - `broadcast`: mailing engine
//! - `report`: `/info` user report
//! - `telegram`: bot setup and handlers

pub mod broadcast;
pub mod cli;
pub mod core;
pub mod redemption;
pub mod report;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult};
pub use storage::{create_pool, get_connection, DbConnection, DbPool};
