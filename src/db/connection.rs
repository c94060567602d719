// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Every connection comes from the pool
// - Pragmas are set once per connection, in one place
// - Failures surface as AppError::Pool or AppError::Io

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub type ConnectionPool = Pool<SqliteConnectionManager>;

pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Upper bound on pooled connections; the change poller pins one of them
const MAX_POOL_SIZE: u32 = 8;

/// Applied to every new connection
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;
     PRAGMA journal_mode = WAL;
     PRAGMA synchronous = NORMAL;
     PRAGMA busy_timeout = 5000;";

/// Default catalog location: {data_dir}/moviedeck/moviedeck.db
pub fn get_database_path() -> AppResult<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    Ok(data_dir.join("moviedeck").join("moviedeck.db"))
}

/// Open a pool on `db_path`, creating missing parent directories
///
/// WAL keeps readers (including the change poller) from blocking writers.
pub fn create_connection_pool(db_path: &Path) -> AppResult<ConnectionPool> {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
        _ => {}
    }

    let manager = SqliteConnectionManager::file(db_path)
        .with_init(|conn| conn.execute_batch(CONNECTION_PRAGMAS));

    let pool = Pool::builder()
        .max_size(MAX_POOL_SIZE)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))?;

    log::debug!("Opened connection pool for {:?}", db_path);
    Ok(pool)
}

pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Private in-memory database for unit tests
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_path() {
        // No data directory on some CI hosts
        if let Ok(path) = get_database_path() {
            assert!(path.ends_with("moviedeck/moviedeck.db"));
        }
    }

    #[test]
    fn test_pool_creates_parent_dirs_and_sets_pragmas() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("catalog.db");

        let pool = create_connection_pool(&db_path).unwrap();
        let conn = get_connection(&pool).unwrap();

        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");

        let busy_timeout: i64 = conn
            .query_row("PRAGMA busy_timeout", [], |row| row.get(0))
            .unwrap();
        assert_eq!(busy_timeout, 5000);

        assert!(db_path.exists());
    }

    #[test]
    fn test_pooled_connections_share_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_connection_pool(&dir.path().join("shared.db")).unwrap();

        let writer = get_connection(&pool).unwrap();
        writer
            .execute_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (7);")
            .unwrap();

        let reader = get_connection(&pool).unwrap();
        let x: i64 = reader.query_row("SELECT x FROM t", [], |row| row.get(0)).unwrap();
        assert_eq!(x, 7);
    }

    #[test]
    fn test_in_memory_connection() {
        let conn = create_test_connection().unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }
}
