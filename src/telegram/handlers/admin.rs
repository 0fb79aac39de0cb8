//! Staff commands: `/info` report and `/mail` broadcast

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, Message, ReplyParameters};

use super::callbacks::CallbackAction;
use super::types::{sender_id, user_id, HandlerDeps, HandlerError};
use crate::broadcast::{self, Draft, MediaKind};
use crate::core::config;
use crate::core::session::MailingState;
use crate::report;
use crate::storage::{get_connection, users};
use crate::telegram::copy;

/// Sends the user list, split into message-sized chunks.
pub async fn handle_info(bot: Bot, msg: Message, deps: HandlerDeps) -> Result<(), HandlerError> {
    let listed = get_connection(&deps.db_pool).and_then(|conn| users::list_users(&conn));

    let users = match listed {
        Ok(users) => users,
        Err(e) => {
            log::error!("/info failed to list users: {}", e);
            bot.send_message(msg.chat.id, copy::INFO_FAILED)
                .reply_parameters(ReplyParameters::new(msg.id))
                .await?;
            return Ok(());
        }
    };

    let chunks = report::render_users(&users, config::report::MAX_CHUNK_CHARS);
    if chunks.is_empty() {
        bot.send_message(msg.chat.id, copy::INFO_EMPTY)
            .reply_parameters(ReplyParameters::new(msg.id))
            .await?;
        return Ok(());
    }

    for (i, chunk) in chunks.into_iter().enumerate() {
        let request = bot.send_message(msg.chat.id, chunk);
        if i == 0 {
            request.reply_parameters(ReplyParameters::new(msg.id)).await?;
        } else {
            request.await?;
        }
    }

    Ok(())
}

pub async fn handle_mail(bot: Bot, msg: Message, deps: HandlerDeps) -> Result<(), HandlerError> {
    deps.mailing.start_composing(sender_id(&msg));
    bot.send_message(msg.chat.id, copy::MAIL_PROMPT).await?;
    Ok(())
}

/// Extracts mailing content from a message.
///
/// Media keeps its caption, except voice which carries none. `None` for
/// content that cannot be mailed (stickers, documents, ...).
pub fn draft_from_message(msg: &Message) -> Option<Draft> {
    let caption = msg.caption().unwrap_or_default();

    if let Some(photo) = msg.photo().and_then(|sizes| sizes.last()) {
        return Some(Draft::with_media(MediaKind::Photo, photo.file.id.0.clone(), caption));
    }
    if let Some(video) = msg.video() {
        return Some(Draft::with_media(MediaKind::Video, video.file.id.0.clone(), caption));
    }
    if let Some(audio) = msg.audio() {
        return Some(Draft::with_media(MediaKind::Audio, audio.file.id.0.clone(), caption));
    }
    if let Some(voice) = msg.voice() {
        return Some(Draft::with_media(MediaKind::Voice, voice.file.id.0.clone(), ""));
    }

    msg.text().map(Draft::text)
}

fn confirm_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(copy::MAIL_CONFIRM_BUTTON, CallbackAction::MailConfirm.data()),
        InlineKeyboardButton::callback(copy::MAIL_CANCEL_BUTTON, CallbackAction::MailCancel.data()),
    ]])
}

/// Takes the admin's next message as the mailing draft.
pub async fn handle_draft(bot: Bot, msg: Message, deps: HandlerDeps) -> Result<(), HandlerError> {
    let admin = sender_id(&msg);

    let Some(draft) = draft_from_message(&msg) else {
        bot.send_message(msg.chat.id, copy::MAIL_UNSUPPORTED).await?;
        return Ok(());
    };

    if deps.mailing.submit_draft(admin, draft) {
        bot.send_message(msg.chat.id, copy::MAIL_CONFIRM_PROMPT)
            .reply_markup(confirm_keyboard())
            .await?;
    }
    Ok(())
}

/// Runs the confirmed mailing in the background and reports the result.
///
/// Only one mailing runs at a time; a confirm pressed meanwhile keeps its
/// draft so the button can be pressed again later.
pub async fn handle_mail_confirm(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> Result<(), HandlerError> {
    let admin = user_id(&q.from);
    let chat_id = q
        .message
        .as_ref()
        .map(|message| message.chat().id)
        .unwrap_or(ChatId(admin));

    let Some(pass) = deps.mailing_gate.try_start() else {
        if matches!(deps.mailing.state(admin), MailingState::ConfirmPending { .. }) {
            log::info!("Mailing confirm from {} held back, another mailing is running", admin);
            bot.send_message(chat_id, copy::MAIL_BUSY).await?;
        }
        return Ok(());
    };

    let Some(draft) = deps.mailing.take_confirmed(admin) else {
        log::debug!("Stale mailing confirmation from {}", admin);
        return Ok(());
    };

    bot.send_message(chat_id, copy::MAIL_STARTED).await?;
    log::info!("Mailing confirmed by {}", admin);

    // Sending to every user takes a while; keep handling updates meanwhile.
    tokio::spawn(async move {
        let _pass = pass;
        let text = match broadcast::run_broadcast(&deps.db_pool, &bot, &draft, deps.send_delay).await {
            Ok(summary) => copy::mailing_finished(&summary),
            Err(e) => {
                log::error!("Mailing by {} failed: {}", admin, e);
                copy::mailing_failed(&e)
            }
        };
        if let Err(e) = bot.send_message(chat_id, text).await {
            log::error!("Failed to report mailing result to {}: {}", chat_id, e);
        }
    });

    Ok(())
}

pub async fn handle_mail_cancel(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> Result<(), HandlerError> {
    let admin = user_id(&q.from);
    if !deps.mailing.cancel(admin) {
        return Ok(());
    }

    let chat_id = q
        .message
        .as_ref()
        .map(|message| message.chat().id)
        .unwrap_or(ChatId(admin));
    bot.send_message(chat_id, copy::MAIL_CANCELLED).await?;
    Ok(())
}
