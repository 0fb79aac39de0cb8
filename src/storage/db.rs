use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use super::error::StoreError;
use super::migrations::run_migrations;
use crate::core::config;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Create a new database connection pool
///
/// Every pooled connection gets a busy timeout so concurrent writers wait
/// for the lock instead of failing with SQLITE_BUSY. The schema is migrated
/// on the first connection.
///
/// # Arguments
///
/// * `database_path` - Path to SQLite database file
///
/// # Example
///
/// ```no_run
/// use prizebot::storage;
///
/// let pool = storage::create_pool("prizes.sqlite")?;
/// # Ok::<(), prizebot::storage::StoreError>(())
/// ```
pub fn create_pool(database_path: &str) -> Result<DbPool, StoreError> {
    let manager = SqliteConnectionManager::file(database_path)
        .with_init(|conn| conn.busy_timeout(config::storage::busy_timeout()));
    let pool = Pool::builder()
        .max_size(config::storage::POOL_MAX_SIZE)
        .build(manager)?;

    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;
    drop(conn);

    log::info!("Database ready at {}", database_path);
    Ok(pool)
}

/// Get a connection from the pool
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, StoreError> {
    Ok(pool.get()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn pool_migrates_a_fresh_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prizes.sqlite");
        let pool = create_pool(path.to_str().unwrap()).unwrap();

        let conn = get_connection(&pool).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM prizes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn reopening_an_existing_database_keeps_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prizes.sqlite");
        let path = path.to_str().unwrap();

        {
            let pool = create_pool(path).unwrap();
            let conn = get_connection(&pool).unwrap();
            conn.execute("INSERT INTO users (telegram_id, created_at) VALUES (1, CURRENT_TIMESTAMP)", [])
                .unwrap();
        }

        let pool = create_pool(path).unwrap();
        let conn = get_connection(&pool).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
