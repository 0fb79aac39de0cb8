//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::admin::{handle_draft, handle_info, handle_mail};
use super::callbacks::handle_callback;
use super::claims::{handle_contact, handle_start};
use super::lookup::handle_lookup;
use super::types::{sender_id, HandlerDeps, HandlerError};
use crate::telegram::bot::{parse_command, Command};

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Branch order matters: a contact always goes to the claim flow, staff
/// commands win over a draft in progress, and a composing admin's next
/// message is taken as the draft before `/start` or code lookup see it.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        .branch(contact_handler(deps.clone()))
        .branch(staff_command_handler(deps.clone()))
        .branch(mail_draft_handler(deps.clone()))
        .branch(start_handler(deps.clone()))
        .branch(code_lookup_handler(deps.clone()))
        .branch(callback_handler(deps))
}

/// Shared contact completing a pending claim
fn contact_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.contact().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_contact(bot, msg, deps).await }
        })
}

/// `/info` and `/mail` from the admin or the developer
fn staff_command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let filter_deps = deps.clone();

    Update::filter_message()
        .filter_map(move |msg: Message| {
            let command = parse_command(msg.text()?, filter_deps.bot_username.as_deref())?;
            let is_staff_command = matches!(command, Command::Info | Command::Mail);
            (is_staff_command && filter_deps.access.is_admin(sender_id(&msg))).then_some(command)
        })
        .endpoint(move |bot: Bot, msg: Message, command: Command| {
            let deps = deps.clone();
            async move {
                log::info!("{:?} from {}", command, sender_id(&msg));
                match command {
                    Command::Info => handle_info(bot, msg, deps).await,
                    Command::Mail => handle_mail(bot, msg, deps).await,
                    Command::Start(_) => Ok(()),
                }
            }
        })
}

/// Next message of an admin who ran `/mail`
fn mail_draft_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let filter_deps = deps.clone();

    Update::filter_message()
        .filter(move |msg: Message| {
            let admin = sender_id(&msg);
            filter_deps.access.is_admin(admin) && filter_deps.mailing.is_composing(admin)
        })
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_draft(bot, msg, deps).await }
        })
}

/// `/start <code>` from anyone
fn start_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let filter_deps = deps.clone();

    Update::filter_message()
        .filter_map(move |msg: Message| match parse_command(msg.text()?, filter_deps.bot_username.as_deref())? {
            Command::Start(code) => Some(code),
            _ => None,
        })
        .endpoint(move |bot: Bot, msg: Message, code: String| {
            let deps = deps.clone();
            async move { handle_start(bot, msg, deps, code).await }
        })
}

/// Plain text in the admin chat is a code to look up
fn code_lookup_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let filter_deps = deps.clone();

    Update::filter_message()
        .filter(move |msg: Message| {
            filter_deps.access.is_admin_chat(msg.chat.id.0)
                && msg.text().is_some_and(|text| !text.trim().is_empty() && !text.starts_with('/'))
        })
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_lookup(bot, msg, deps).await }
        })
}

/// Inline buttons: mailing confirmation and code activation
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move { handle_callback(bot, q, deps).await }
    })
}
