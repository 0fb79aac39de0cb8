use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors produced by the prize/user store.
///
/// Conflict variants are sentinels the bot layer matches on to pick the
/// reply for the user; `Database` carries the failed operation name.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("prize not found")]
    PrizeNotFound,

    #[error("user already exists")]
    UserExists,

    #[error("phone already exists")]
    PhoneExists,

    #[error("telegram_id already assigned")]
    AlreadyBound,

    #[error("code already exists")]
    CodeExists,

    #[error("{op}: {source}")]
    Database {
        op: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("migration error: {0}")]
    Migration(String),
}

/// Coarse classification used when choosing user-facing copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Code or user absent
    NotFound,
    /// Unique-constraint violation or an already-bound prize
    Conflict,
    /// Connectivity or query failure; the caller may retry later
    Transient,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::PrizeNotFound => ErrorKind::NotFound,
            StoreError::UserExists | StoreError::PhoneExists | StoreError::AlreadyBound | StoreError::CodeExists => {
                ErrorKind::Conflict
            }
            StoreError::Database { .. } | StoreError::Pool(_) | StoreError::Migration(_) => ErrorKind::Transient,
        }
    }
}

/// Attaches the operation name to a raw rusqlite error.
pub(crate) trait DbContext<T> {
    fn during(self, op: &'static str) -> Result<T, StoreError>;
}

impl<T> DbContext<T> for rusqlite::Result<T> {
    fn during(self, op: &'static str) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Database { op, source })
    }
}

/// True for UNIQUE and PRIMARY KEY violations.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}
