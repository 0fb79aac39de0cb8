//! Bot users and their shared phone numbers

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::error::{is_unique_violation, DbContext, StoreError};

/// A person who has started the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub telegram_id: i64,
    /// Phone shared via the contact button; unique across users
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        telegram_id: row.get(0)?,
        phone: row.get(1)?,
        created_at: row.get(2)?,
    })
}

fn insert_user(conn: &Connection, telegram_id: i64, created_at: DateTime<Utc>) -> Result<(), StoreError> {
    match conn.execute(
        "INSERT INTO users (telegram_id, created_at) VALUES (?1, ?2)",
        params![telegram_id, created_at],
    ) {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(StoreError::UserExists),
        Err(e) => Err(StoreError::Database { op: "create_user", source: e }),
    }
}

/// Registers a user. Fails with [`StoreError::UserExists`] on a repeat.
pub fn create_user(conn: &Connection, telegram_id: i64) -> Result<(), StoreError> {
    insert_user(conn, telegram_id, Utc::now())
}

pub fn get_user(conn: &Connection, telegram_id: i64) -> Result<Option<User>, StoreError> {
    conn.query_row(
        "SELECT telegram_id, phone, created_at FROM users WHERE telegram_id = ?1",
        [telegram_id],
        user_from_row,
    )
    .optional()
    .during("get_user")
}

/// Stores the user's phone.
///
/// Fails with [`StoreError::PhoneExists`] when another user already has
/// this number. Updating a missing user is a silent no-op.
pub fn update_user_phone(conn: &Connection, telegram_id: i64, phone: &str) -> Result<(), StoreError> {
    match conn.execute(
        "UPDATE users SET phone = ?1 WHERE telegram_id = ?2",
        params![phone, telegram_id],
    ) {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(StoreError::PhoneExists),
        Err(e) => Err(StoreError::Database { op: "update_user_phone", source: e }),
    }
}

/// All user ids, oldest first.
pub fn list_user_ids(conn: &Connection) -> Result<Vec<i64>, StoreError> {
    let mut stmt = conn
        .prepare("SELECT telegram_id FROM users ORDER BY created_at, telegram_id")
        .during("list_user_ids")?;
    let ids = stmt
        .query_map([], |row| row.get(0))
        .during("list_user_ids")?
        .collect::<rusqlite::Result<Vec<i64>>>()
        .during("list_user_ids")?;
    Ok(ids)
}

/// All users, oldest first.
pub fn list_users(conn: &Connection) -> Result<Vec<User>, StoreError> {
    let mut stmt = conn
        .prepare("SELECT telegram_id, phone, created_at FROM users ORDER BY created_at, telegram_id")
        .during("list_users")?;
    let users = stmt
        .query_map([], user_from_row)
        .during("list_users")?
        .collect::<rusqlite::Result<Vec<User>>>()
        .during("list_users")?;
    Ok(users)
}
