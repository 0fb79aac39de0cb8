use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN, TELEGRAM_BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELEGRAM_BOT_TOKEN"))
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server (local telegram-bot-api), if any
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok());

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: prizes.sqlite
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "prizes.sqlite".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: prizebot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "prizebot.log".to_string()));

/// Fixed identities allowed to use administrative features.
///
/// Every id defaults to 0, which matches no real Telegram user or chat,
/// so an unset variable simply disables the corresponding feature.
pub mod admin {
    use once_cell::sync::Lazy;
    use std::env;

    fn parse_id(var: &str) -> i64 {
        env::var(var)
            .ok()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(0)
    }

    /// Main administrator (ADMIN_ID)
    pub static ADMIN_ID: Lazy<i64> = Lazy::new(|| parse_id("ADMIN_ID"));

    /// Developer account with the same rights as the administrator (DEVELOPER_TG_ID)
    pub static DEVELOPER_ID: Lazy<i64> = Lazy::new(|| parse_id("DEVELOPER_TG_ID"));

    /// Group chat where staff look up and activate codes (ADMIN_TELEGRAM_CHAT_ID)
    pub static ADMIN_CHAT_ID: Lazy<i64> = Lazy::new(|| parse_id("ADMIN_TELEGRAM_CHAT_ID"));
}

/// Broadcast configuration
pub mod broadcast {
    use super::Duration;

    /// Pause after every outbound message during a mailing (milliseconds)
    pub const SEND_DELAY_MS: u64 = 50;

    pub fn send_delay() -> Duration {
        Duration::from_millis(SEND_DELAY_MS)
    }
}

/// `/info` report configuration
pub mod report {
    /// Telegram caps messages at 4096 chars; keep a margin.
    pub const MAX_CHUNK_CHARS: usize = 4000;
}

/// Prize code generation
pub mod codes {
    /// Length of a freshly generated code
    pub const LENGTH: usize = 6;

    /// Alphabet of generated codes
    pub const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// How many fresh codes to try before giving up on a unique-code collision
    pub const MAX_CREATE_ATTEMPTS: u32 = 5;
}

/// Activation timestamps
pub mod activation {
    use chrono::{FixedOffset, Offset, Utc};

    /// Activation times are recorded and shown in Moscow time (UTC+3).
    pub const UTC_OFFSET_HOURS: i32 = 3;

    pub fn offset() -> FixedOffset {
        FixedOffset::east_opt(UTC_OFFSET_HOURS * 3600).unwrap_or_else(|| Utc.fix())
    }
}

/// Storage configuration
pub mod storage {
    use super::Duration;

    /// Maximum number of pooled SQLite connections
    pub const POOL_MAX_SIZE: u32 = 8;

    /// How long a writer waits on a locked database before failing (seconds)
    pub const BUSY_TIMEOUT_SECS: u64 = 5;

    pub fn busy_timeout() -> Duration {
        Duration::from_secs(BUSY_TIMEOUT_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}
