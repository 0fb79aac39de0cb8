//! Handler types and dependencies

use std::sync::Arc;
use std::time::Duration;

use teloxide::types::{Message, User};

use crate::core::config;
use crate::core::session::{ClaimSessions, MailingGate, MailingSessions};
use crate::storage::DbPool;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Who may use the staff features.
///
/// A zero id never matches, so unset identities disable the feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessConfig {
    pub admin_id: i64,
    pub developer_id: i64,
    pub admin_chat_id: i64,
}

impl AccessConfig {
    pub fn from_env() -> Self {
        Self {
            admin_id: *config::admin::ADMIN_ID,
            developer_id: *config::admin::DEVELOPER_ID,
            admin_chat_id: *config::admin::ADMIN_CHAT_ID,
        }
    }

    /// `/info` and `/mail` are limited to the admin and the developer.
    pub fn is_admin(&self, user_id: i64) -> bool {
        user_id != 0 && (user_id == self.admin_id || user_id == self.developer_id)
    }

    /// Code lookup and activation only work in the staff group.
    pub fn is_admin_chat(&self, chat_id: i64) -> bool {
        chat_id != 0 && chat_id == self.admin_chat_id
    }
}

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub db_pool: Arc<DbPool>,
    pub claims: Arc<ClaimSessions>,
    pub mailing: Arc<MailingSessions>,
    /// Shared by every staff member; one mailing pass at a time
    pub mailing_gate: MailingGate,
    pub access: AccessConfig,
    pub bot_username: Option<String>,
    /// Pause after each mailing message
    pub send_delay: Duration,
}

impl HandlerDeps {
    /// Create new handler dependencies with empty sessions
    pub fn new(db_pool: Arc<DbPool>, access: AccessConfig, bot_username: Option<String>) -> Self {
        Self {
            db_pool,
            claims: Arc::new(ClaimSessions::new()),
            mailing: Arc::new(MailingSessions::new()),
            mailing_gate: MailingGate::new(),
            access,
            bot_username,
            send_delay: config::broadcast::send_delay(),
        }
    }
}

/// Telegram user id as stored in the database.
pub fn user_id(user: &User) -> i64 {
    i64::try_from(user.id.0).unwrap_or(0)
}

/// Id of the message author, 0 for channel posts and other anonymous messages.
pub fn sender_id(msg: &Message) -> i64 {
    msg.from.as_ref().map(user_id).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access() -> AccessConfig {
        AccessConfig { admin_id: 100, developer_id: 200, admin_chat_id: -300 }
    }

    #[test]
    fn admin_and_developer_are_staff() {
        let access = access();
        assert!(access.is_admin(100));
        assert!(access.is_admin(200));
        assert!(!access.is_admin(300));
    }

    #[test]
    fn unset_ids_match_nobody() {
        let access = AccessConfig { admin_id: 0, developer_id: 0, admin_chat_id: 0 };
        assert!(!access.is_admin(0));
        assert!(!access.is_admin_chat(0));
    }

    #[test]
    fn only_the_staff_chat_is_admin_chat() {
        let access = access();
        assert!(access.is_admin_chat(-300));
        assert!(!access.is_admin_chat(100));
    }
}
