//! Store fixtures backed by a temporary SQLite file

#![allow(dead_code)]

use std::sync::Arc;

use prizebot::storage::{create_pool, get_connection, prizes, users, DbConnection, DbPool};
use tempfile::TempDir;

/// A migrated database in a temporary directory, removed on drop.
pub struct TestStore {
    pub pool: Arc<DbPool>,
    _dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let pool = file_pool(&dir);
        Self { pool: Arc::new(pool), _dir: dir }
    }

    pub fn conn(&self) -> DbConnection {
        get_connection(&self.pool).expect("get connection")
    }

    pub fn with_prize(self, code: &str, label: &str) -> Self {
        prizes::insert_prize(&self.conn(), code, label).expect("insert prize");
        self
    }

    pub fn with_users(self, ids: &[i64]) -> Self {
        {
            let conn = self.conn();
            for &id in ids {
                users::create_user(&conn, id).expect("create user");
            }
        }
        self
    }
}

pub fn file_pool(dir: &TempDir) -> DbPool {
    let path = dir.path().join("prizes.sqlite");
    create_pool(path.to_str().expect("utf-8 path")).expect("create pool")
}
