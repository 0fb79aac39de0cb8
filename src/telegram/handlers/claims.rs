//! Claimant side: `/start <code>` and the shared contact

use teloxide::prelude::*;
use teloxide::types::{ButtonRequest, KeyboardButton, KeyboardMarkup, KeyboardRemove, Message};

use super::types::{sender_id, HandlerDeps, HandlerError};
use crate::redemption::{self, ContactOutcome, ContactSubmission, StartOutcome};
use crate::storage::get_connection;
use crate::telegram::copy;

fn phone_request_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(copy::SHARE_PHONE_BUTTON).request(ButtonRequest::Contact)
    ]])
    .one_time_keyboard()
    .resize_keyboard()
}

pub async fn handle_start(bot: Bot, msg: Message, deps: HandlerDeps, raw_code: String) -> Result<(), HandlerError> {
    let claimant = sender_id(&msg);
    if claimant == 0 {
        return Ok(());
    }

    let outcome = {
        let conn = get_connection(&deps.db_pool)?;
        redemption::start_claim(&conn, &deps.claims, claimant, &raw_code)
    };

    match outcome {
        Ok(StartOutcome::AwaitingPhone { .. }) => {
            bot.send_message(msg.chat.id, copy::PHONE_PROMPT)
                .reply_markup(phone_request_keyboard())
                .await?;
        }
        Ok(StartOutcome::ExistingPrize(prize)) => {
            bot.send_message(msg.chat.id, copy::existing_prize(&prize)).await?;
        }
        Ok(StartOutcome::Ignored) | Ok(StartOutcome::Silent) => {}
        Err(e) => {
            log::error!("/start failed for {}: {}", claimant, e);
        }
    }

    Ok(())
}

/// Reply for a contact outcome; `None` means stay silent.
fn contact_reply(outcome: &ContactOutcome) -> Option<String> {
    let text = match outcome {
        ContactOutcome::OwnerMismatch => copy::OWN_PHONE_REQUIRED.to_string(),
        ContactOutcome::NoPendingClaim | ContactOutcome::PrizeUnavailable => return None,
        ContactOutcome::PhoneReused => copy::PHONE_REUSED.to_string(),
        ContactOutcome::PhoneSaveFailed => copy::PHONE_SAVE_FAILED.to_string(),
        ContactOutcome::AlreadyClaimed => copy::PRIZE_ALREADY_CLAIMED.to_string(),
        ContactOutcome::CodeNotFound => copy::PRIZE_CODE_UNKNOWN.to_string(),
        ContactOutcome::BindFailed => copy::PRIZE_BIND_FAILED.to_string(),
        ContactOutcome::Bound { prize, code } => copy::prize_bound(prize, code),
    };
    Some(text)
}

pub async fn handle_contact(bot: Bot, msg: Message, deps: HandlerDeps) -> Result<(), HandlerError> {
    let Some(contact) = msg.contact() else {
        return Ok(());
    };

    let submission = ContactSubmission {
        requester: sender_id(&msg),
        contact_owner: contact.user_id.map(|id| i64::try_from(id.0).unwrap_or(0)),
        phone: contact.phone_number.clone(),
    };

    let outcome = {
        let conn = get_connection(&deps.db_pool)?;
        redemption::submit_contact(&conn, &deps.claims, &submission)
    };

    let Some(text) = contact_reply(&outcome) else {
        return Ok(());
    };

    // A mismatched contact keeps the claim open, so the phone button stays.
    if outcome == ContactOutcome::OwnerMismatch {
        bot.send_message(msg.chat.id, text).await?;
    } else {
        bot.send_message(msg.chat.id, text)
            .reply_markup(KeyboardRemove::new())
            .await?;
    }

    log::debug!("Contact from {} handled: {:?}", submission.requester, outcome);
    Ok(())
}
