//! SQLite-backed prize and user store

pub mod db;
pub mod error;
pub mod migrations;
pub mod prizes;
pub mod users;

// Re-exports for convenience
pub use db::{create_pool, get_connection, DbConnection, DbPool};
pub use error::{ErrorKind, StoreError};
pub use prizes::Prize;
pub use users::User;
