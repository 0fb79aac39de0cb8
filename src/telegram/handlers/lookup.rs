//! Admin chat: code lookup and activation

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, Message, ReplyParameters};

use super::callbacks::CallbackAction;
use super::types::{HandlerDeps, HandlerError};
use crate::redemption::{self, LookupOutcome};
use crate::storage::get_connection;
use crate::telegram::copy;

fn activate_keyboard(code: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        copy::ACTIVATE_BUTTON,
        CallbackAction::Activate(code.to_string()).data(),
    )]])
}

pub async fn handle_lookup(bot: Bot, msg: Message, deps: HandlerDeps) -> Result<(), HandlerError> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let outcome = get_connection(&deps.db_pool).and_then(|conn| redemption::lookup_code(&conn, text));
    let reply = ReplyParameters::new(msg.id);

    match outcome {
        Ok(LookupOutcome::NotFound) => {
            log::info!("Lookup of unknown code {:?}", text);
            bot.send_message(msg.chat.id, copy::CODE_NOT_FOUND)
                .reply_parameters(reply)
                .await?;
        }
        Ok(LookupOutcome::Unbound(prize)) => {
            log::info!("Lookup of unclaimed code {}", prize.code);
            bot.send_message(msg.chat.id, copy::CODE_NOT_BOUND)
                .reply_parameters(reply)
                .await?;
        }
        Ok(LookupOutcome::Claimed(prize)) => {
            let request = bot
                .send_message(msg.chat.id, copy::prize_status(&prize))
                .reply_parameters(reply);
            if prize.is_activated() {
                request.await?;
            } else {
                request.reply_markup(activate_keyboard(&prize.code)).await?;
            }
        }
        Err(e) => {
            log::error!("Lookup of {:?} failed: {}", text, e);
            bot.send_message(msg.chat.id, copy::LOOKUP_FAILED)
                .reply_parameters(reply)
                .await?;
        }
    }

    Ok(())
}

/// Activates the code and rewrites the lookup message with the new status.
pub async fn handle_activate(bot: Bot, q: CallbackQuery, deps: HandlerDeps, code: String) -> Result<(), HandlerError> {
    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    if !deps.access.is_admin_chat(chat_id.0) {
        log::warn!("Activation of {} attempted outside the admin chat ({})", code, chat_id);
        return Ok(());
    }

    match get_connection(&deps.db_pool).and_then(|conn| redemption::activate(&conn, &code)) {
        Ok(prize) => {
            bot.edit_message_text(chat_id, message.id(), copy::prize_status(&prize))
                .await?;
        }
        Err(e) => {
            log::error!("Activation of {} failed: {}", code, e);
            bot.send_message(chat_id, copy::ACTIVATION_FAILED).await?;
        }
    }

    Ok(())
}
