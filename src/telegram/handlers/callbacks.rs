//! Inline button routing

use teloxide::prelude::*;

use super::admin::{handle_mail_cancel, handle_mail_confirm};
use super::lookup::handle_activate;
use super::types::{HandlerDeps, HandlerError};

pub const MAIL_CONFIRM: &str = "mail_confirm";
pub const MAIL_CANCEL: &str = "mail_cancel";
pub const ACTIVATE_PREFIX: &str = "activate_";

/// What an inline button asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    MailConfirm,
    MailCancel,
    Activate(String),
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            MAIL_CONFIRM => Some(Self::MailConfirm),
            MAIL_CANCEL => Some(Self::MailCancel),
            _ => data
                .strip_prefix(ACTIVATE_PREFIX)
                .filter(|code| !code.is_empty())
                .map(|code| Self::Activate(code.to_string())),
        }
    }

    /// Callback data carried by the button.
    pub fn data(&self) -> String {
        match self {
            Self::MailConfirm => MAIL_CONFIRM.to_string(),
            Self::MailCancel => MAIL_CANCEL.to_string(),
            Self::Activate(code) => format!("{}{}", ACTIVATE_PREFIX, code),
        }
    }
}

pub async fn handle_callback(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> Result<(), HandlerError> {
    bot.answer_callback_query(q.id.clone()).await?;

    match q.data.as_deref().and_then(CallbackAction::parse) {
        Some(CallbackAction::MailConfirm) => handle_mail_confirm(bot, q, deps).await,
        Some(CallbackAction::MailCancel) => handle_mail_cancel(bot, q, deps).await,
        Some(CallbackAction::Activate(code)) => handle_activate(bot, q, deps, code).await,
        None => {
            log::debug!("Ignoring unknown callback data {:?}", q.data);
            Ok(())
        }
    }
}
