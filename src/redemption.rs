//! Code redemption and activation
//!
//! A claimant goes `/start <code>` → shares their phone → gets the prize
//! bound to their account. Staff later look the code up in the admin chat
//! and activate it when the prize is handed over.
//!
//! These functions only decide; the Telegram layer turns each outcome into
//! a reply.

use rusqlite::Connection;

use crate::core::code;
use crate::core::session::ClaimSessions;
use crate::storage::{prizes, users, Prize, StoreError};

/// Result of `/start <code>`.
#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    /// No code in the command
    Ignored,
    /// First contact: the code is pending until the phone arrives
    AwaitingPhone { code: String },
    /// Returning user who already holds a prize
    ExistingPrize(Prize),
    /// Returning user without a prize; nothing is sent and no claim opens
    Silent,
}

/// Handles `/start <code>`.
///
/// Only a claimant's very first `/start` opens a pending claim. A known
/// user without a prize stays silent even with a fresh code, so a claim
/// lost to a restart or abandoned after a failed bind cannot be reopened
/// from the bot. Store failures are returned for the caller to log.
pub fn start_claim(
    conn: &Connection,
    claims: &ClaimSessions,
    claimant: i64,
    raw_code: &str,
) -> Result<StartOutcome, StoreError> {
    let code = code::normalize(raw_code);
    if code.is_empty() {
        return Ok(StartOutcome::Ignored);
    }

    match users::create_user(conn, claimant) {
        Ok(()) => {
            log::info!("New claimant {} started with code {}", claimant, code);
            claims.begin(claimant, code.clone());
            Ok(StartOutcome::AwaitingPhone { code })
        }
        Err(StoreError::UserExists) => match prizes::get_prize_by_user(conn, claimant)? {
            Some(prize) => Ok(StartOutcome::ExistingPrize(prize)),
            None => Ok(StartOutcome::Silent),
        },
        Err(e) => Err(e),
    }
}

/// A contact shared in a private chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    /// Sender of the message
    pub requester: i64,
    /// Account the contact card belongs to, if Telegram knows it
    pub contact_owner: Option<i64>,
    pub phone: String,
}

/// Result of a shared contact.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactOutcome {
    /// Someone else's card; the pending claim is kept
    OwnerMismatch,
    /// No `/start <code>` preceded the contact
    NoPendingClaim,
    /// The phone is already attached to another user
    PhoneReused,
    PhoneSaveFailed,
    /// Somebody claimed the code first
    AlreadyClaimed,
    CodeNotFound,
    BindFailed,
    /// The prize is now bound to the requester
    Bound { prize: Prize, code: String },
    /// Bound, but re-reading the prize failed; nothing is sent
    PrizeUnavailable,
}

/// `+` and the digits of a shared phone number.
///
/// Clients send the same number as `+7999...`, `7999...` or with spaces and
/// dashes; one form keeps the unique phone index meaningful. Input without
/// digits is kept as-is, trimmed.
pub fn canonical_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        raw.trim().to_string()
    } else {
        format!("+{}", digits)
    }
}

/// Handles a shared contact: stores the phone, then binds the pending code.
///
/// Every outcome past the ownership and pending-claim checks discards the
/// pending claim. A phone stored before a failed bind stays stored.
pub fn submit_contact(conn: &Connection, claims: &ClaimSessions, contact: &ContactSubmission) -> ContactOutcome {
    let requester = contact.requester;
    if contact.contact_owner != Some(requester) {
        return ContactOutcome::OwnerMismatch;
    }

    let Some(code) = claims.finish(requester) else {
        return ContactOutcome::NoPendingClaim;
    };

    let phone = canonical_phone(&contact.phone);
    match users::update_user_phone(conn, requester, &phone) {
        Ok(()) => {}
        Err(StoreError::PhoneExists) => {
            log::info!("Claimant {} shared a phone already in use", requester);
            return ContactOutcome::PhoneReused;
        }
        Err(e) => {
            log::error!("Failed to save phone for {}: {}", requester, e);
            return ContactOutcome::PhoneSaveFailed;
        }
    }

    match prizes::bind_claimant(conn, requester, &code) {
        Ok(()) => {}
        Err(StoreError::AlreadyBound) => {
            log::info!("Code {} already claimed, rejected for {}", code, requester);
            return ContactOutcome::AlreadyClaimed;
        }
        Err(StoreError::PrizeNotFound) => {
            log::info!("Claimant {} used unknown code {}", requester, code);
            return ContactOutcome::CodeNotFound;
        }
        Err(e) => {
            log::error!("Failed to bind code {} to {}: {}", code, requester, e);
            return ContactOutcome::BindFailed;
        }
    }

    match prizes::get_prize_by_user(conn, requester) {
        Ok(Some(prize)) => {
            log::info!("Code {} bound to {}", code, requester);
            ContactOutcome::Bound { prize, code }
        }
        Ok(None) => {
            log::error!("Prize for {} vanished right after binding code {}", requester, code);
            ContactOutcome::PrizeUnavailable
        }
        Err(e) => {
            log::error!("Failed to load prize for {}: {}", requester, e);
            ContactOutcome::PrizeUnavailable
        }
    }
}

/// Result of a staff code lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    NotFound,
    /// Nobody has claimed the code; it cannot be activated
    Unbound(Prize),
    Claimed(Prize),
}

/// Looks up a code typed into the admin chat.
pub fn lookup_code(conn: &Connection, raw_code: &str) -> Result<LookupOutcome, StoreError> {
    let prize = match prizes::get_prize_by_code(conn, raw_code) {
        Ok(prize) => prize,
        Err(StoreError::PrizeNotFound) => return Ok(LookupOutcome::NotFound),
        Err(e) => return Err(e),
    };

    if prizes::is_code_claimed(conn, &prize.code)? {
        Ok(LookupOutcome::Claimed(prize))
    } else {
        Ok(LookupOutcome::Unbound(prize))
    }
}

/// Activates the code and returns the refreshed prize.
pub fn activate(conn: &Connection, raw_code: &str) -> Result<Prize, StoreError> {
    prizes::activate_code(conn, raw_code)?;
    let prize = prizes::get_prize_by_code(conn, raw_code)?;
    log::info!("Code {} activated", prize.code);
    Ok(prize)
}
