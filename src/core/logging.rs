//! Logging initialization
//!
//! Installs a combined terminal + file logger behind the `log` facade.

use anyhow::Result;
use simplelog::*;
use std::fs::OpenOptions;

/// Initialize logger for both console and file output
///
/// The log file is appended to, so restarts keep the history of
/// previous runs (handy when reconstructing a failed mailing).
///
/// # Arguments
/// * `log_file_path` - Path to the log file
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", log_file_path, e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs which administrative identities are configured
///
/// A zero id means the feature is disabled; that is worth a warning at
/// startup rather than a silent no-op later.
pub fn log_admin_configuration(admin_id: i64, developer_id: i64, admin_chat_id: i64) {
    if admin_id == 0 {
        log::warn!("ADMIN_ID is not set: /info and /mail are available to the developer only");
    } else {
        log::info!("Admin id: {}", admin_id);
    }

    if developer_id == 0 {
        log::warn!("DEVELOPER_TG_ID is not set");
    } else {
        log::info!("Developer id: {}", developer_id);
    }

    if admin_chat_id == 0 {
        log::warn!("ADMIN_TELEGRAM_CHAT_ID is not set: code lookup and activation are disabled");
    } else {
        log::info!("Admin chat id: {}", admin_chat_id);
    }
}
