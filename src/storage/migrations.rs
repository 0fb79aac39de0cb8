use rusqlite::Connection;
use std::sync::{Mutex, OnceLock};

use super::error::{DbContext, StoreError};
use crate::core::config;

mod embedded {
    use refinery::embed_migrations;

    embed_migrations!("./migrations");
}

static MIGRATION_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Brings the schema up to date.
///
/// Refinery wraps each migration in its own transaction, so only an
/// in-process lock is taken here; other processes wait on the busy timeout.
pub fn run_migrations(conn: &mut Connection) -> Result<(), StoreError> {
    let mutex = MIGRATION_LOCK.get_or_init(|| Mutex::new(()));
    let _guard = match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("Migration lock was poisoned, recovering...");
            poisoned.into_inner()
        }
    };

    conn.busy_timeout(config::storage::busy_timeout())
        .during("set busy timeout")?;

    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| StoreError::Migration(e.to_string()))?;

    for migration in report.applied_migrations() {
        log::info!("Applied migration {}", migration);
    }
    Ok(())
}

/// Opens a migrated in-memory database.
#[doc(hidden)]
pub fn open_in_memory() -> Result<Connection, StoreError> {
    let mut conn = Connection::open_in_memory().during("open in-memory database")?;
    run_migrations(&mut conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_create_both_tables() {
        let conn = open_in_memory().unwrap();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('prizes', 'users') ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(tables, vec!["prizes".to_string(), "users".to_string()]);
    }

    #[test]
    fn migrations_are_rerunnable() {
        let mut conn = open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
    }
}
