//! Prize records: creation, claim binding and activation

use chrono::{DateTime, FixedOffset, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::error::{is_unique_violation, DbContext, StoreError};
use crate::core::code;
use crate::core::config::{activation, codes};

/// A redeemable prize.
#[derive(Debug, Clone, PartialEq)]
pub struct Prize {
    pub id: i64,
    /// Normalized code, unique across all prizes
    pub code: String,
    /// Human readable prize label
    pub prize: String,
    /// Claimant, once the code has been redeemed; never changes afterwards
    pub telegram_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    /// Set when staff hand the prize over
    pub used_at: Option<DateTime<Utc>>,
}

impl Prize {
    pub fn is_claimed(&self) -> bool {
        self.telegram_id.is_some()
    }

    pub fn is_activated(&self) -> bool {
        self.used_at.is_some()
    }

    /// Activation time in the fixed display offset (UTC+3).
    pub fn activated_at_local(&self) -> Option<DateTime<FixedOffset>> {
        self.used_at.map(|at| at.with_timezone(&activation::offset()))
    }
}

const PRIZE_COLUMNS: &str = "id, code, prize, telegram_id, created_at, used_at";

fn prize_from_row(row: &Row<'_>) -> rusqlite::Result<Prize> {
    Ok(Prize {
        id: row.get(0)?,
        code: row.get(1)?,
        prize: row.get(2)?,
        telegram_id: row.get(3)?,
        created_at: row.get(4)?,
        used_at: row.get(5)?,
    })
}

/// Inserts a prize under an explicit code.
///
/// The code is normalized before it is stored. Fails with
/// [`StoreError::CodeExists`] if the normalized code is taken.
pub fn insert_prize(conn: &Connection, raw_code: &str, label: &str) -> Result<String, StoreError> {
    let code = code::normalize(raw_code);
    match conn.execute(
        "INSERT INTO prizes (code, prize, created_at) VALUES (?1, ?2, ?3)",
        params![code, label, Utc::now()],
    ) {
        Ok(_) => Ok(code),
        Err(e) if is_unique_violation(&e) => Err(StoreError::CodeExists),
        Err(e) => Err(StoreError::Database { op: "insert_prize", source: e }),
    }
}

/// Creates a prize under a freshly generated code and returns the code.
///
/// A collision with an existing code is retried with a new code a few
/// times before giving up.
pub fn create_prize(conn: &Connection, label: &str) -> Result<String, StoreError> {
    for attempt in 1..=codes::MAX_CREATE_ATTEMPTS {
        match insert_prize(conn, &code::new_code(), label) {
            Err(StoreError::CodeExists) => {
                log::warn!("Generated code collided (attempt {}), retrying", attempt);
            }
            other => return other,
        }
    }
    Err(StoreError::CodeExists)
}

/// Returns the prize claimed by `user_id`, if any.
pub fn get_prize_by_user(conn: &Connection, user_id: i64) -> Result<Option<Prize>, StoreError> {
    conn.query_row(
        &format!("SELECT {} FROM prizes WHERE telegram_id = ?1 ORDER BY id LIMIT 1", PRIZE_COLUMNS),
        [user_id],
        prize_from_row,
    )
    .optional()
    .during("get_prize_by_user")
}

/// Looks a prize up by code, in any of its typed variants.
pub fn get_prize_by_code(conn: &Connection, code: &str) -> Result<Prize, StoreError> {
    conn.query_row(
        &format!("SELECT {} FROM prizes WHERE code = ?1", PRIZE_COLUMNS),
        [code::normalize(code)],
        prize_from_row,
    )
    .optional()
    .during("get_prize_by_code")?
    .ok_or(StoreError::PrizeNotFound)
}

/// Whether the code already has a claimant.
pub fn is_code_claimed(conn: &Connection, code: &str) -> Result<bool, StoreError> {
    let claimant: Option<i64> = conn
        .query_row(
            "SELECT telegram_id FROM prizes WHERE code = ?1",
            [code::normalize(code)],
            |row| row.get(0),
        )
        .optional()
        .during("is_code_claimed")?
        .ok_or(StoreError::PrizeNotFound)?;
    Ok(claimant.is_some())
}

/// Binds the prize to `user_id` if nobody has claimed it yet.
///
/// The update is conditional on `telegram_id IS NULL`, so of several
/// concurrent binds exactly one succeeds. A no-op update is then told
/// apart: unknown code or already claimed.
pub fn bind_claimant(conn: &Connection, user_id: i64, code: &str) -> Result<(), StoreError> {
    let code = code::normalize(code);
    let updated = conn
        .execute(
            "UPDATE prizes SET telegram_id = ?1 WHERE code = ?2 AND telegram_id IS NULL",
            params![user_id, code],
        )
        .during("bind_claimant")?;
    if updated == 1 {
        return Ok(());
    }

    let exists: bool = conn
        .query_row("SELECT EXISTS(SELECT 1 FROM prizes WHERE code = ?1)", [code], |row| row.get(0))
        .during("bind_claimant")?;
    if exists {
        Err(StoreError::AlreadyBound)
    } else {
        Err(StoreError::PrizeNotFound)
    }
}

/// Marks the prize handed over at the current time.
///
/// Activating twice overwrites the earlier timestamp.
pub fn activate_code(conn: &Connection, code: &str) -> Result<(), StoreError> {
    activate_code_at(conn, code, Utc::now().with_timezone(&activation::offset()))
}

/// Marks the prize handed over at `at`.
pub fn activate_code_at(conn: &Connection, code: &str, at: DateTime<FixedOffset>) -> Result<(), StoreError> {
    let updated = conn
        .execute(
            "UPDATE prizes SET used_at = ?1 WHERE code = ?2",
            params![at, code::normalize(code)],
        )
        .during("activate_code")?;
    if updated == 0 {
        return Err(StoreError::PrizeNotFound);
    }
    Ok(())
}
