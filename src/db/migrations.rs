// src/db/migrations.rs
//
// Schema versioning
//
// PRINCIPLES:
// - The version lives in PRAGMA user_version
// - Migrations only ever move forward
// - All pending steps commit together or not at all

use crate::error::{AppError, AppResult};
use rusqlite::Connection;

/// One schema step; `version` is the user_version after it has run
struct Migration {
    version: i64,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("../../schema.sql"),
}];

fn latest_version() -> i64 {
    MIGRATIONS.last().map_or(0, |m| m.version)
}

/// Bring the schema up to date
///
/// Safe to call on every start; a current database is left untouched.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current = schema_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(AppError::Other(format!(
            "Database schema v{} is newer than supported v{}. Update the application.",
            current, latest
        )));
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        tx.execute_batch(migration.sql).map_err(|e| {
            AppError::Other(format!(
                "Failed to apply schema v{}: {}",
                migration.version, e
            ))
        })?;
        tx.pragma_update(None, "user_version", migration.version)?;
        log::info!("Applied catalog schema v{}", migration.version);
    }
    tx.commit()?;

    Ok(())
}

fn schema_version(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Run SQLite's integrity check
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if result != "ok" {
        return Err(AppError::Other(format!(
            "Database integrity check failed: {}",
            result
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStats {
    pub schema_version: i64,
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub document_count: i64,
    pub collection_count: i64,
}

pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let pragma = |name: &str| -> AppResult<i64> {
        Ok(conn.query_row(&format!("PRAGMA {}", name), [], |row| row.get(0))?)
    };
    let page_count = pragma("page_count")?;
    let page_size = pragma("page_size")?;

    let (document_count, collection_count): (i64, i64) = conn.query_row(
        "SELECT COUNT(*), COUNT(DISTINCT collection) FROM documents",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(DatabaseStats {
        schema_version: schema_version(conn)?,
        size_bytes: page_count * page_size,
        page_count,
        page_size,
        document_count,
        collection_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
            [name],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_fresh_database_gets_latest_schema() {
        let conn = create_test_connection().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);

        initialize_database(&conn).unwrap();

        assert_eq!(schema_version(&conn).unwrap(), latest_version());
        assert!(table_exists(&conn, "documents"));
    }

    #[test]
    fn test_initialize_twice_is_a_no_op() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        conn.execute(
            "INSERT INTO documents VALUES ('movies', 'a', '{}', 'now', 'now')",
            [],
        )
        .unwrap();

        initialize_database(&conn).unwrap();

        let stats = get_database_stats(&conn).unwrap();
        assert_eq!(stats.document_count, 1);
        assert_eq!(stats.schema_version, latest_version());
    }

    #[test]
    fn test_newer_schema_rejected() {
        let conn = create_test_connection().unwrap();
        conn.pragma_update(None, "user_version", latest_version() + 1)
            .unwrap();

        let err = initialize_database(&conn).unwrap_err();
        assert!(err.to_string().contains("newer than supported"));
        assert!(!table_exists(&conn, "documents"));
    }

    #[test]
    fn test_document_body_must_be_json() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO documents VALUES ('movies', 'a', 'not json', 'now', 'now')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_document_key_is_per_collection() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let insert = "INSERT INTO documents VALUES (?1, 'same-id', '{}', 'now', 'now')";
        conn.execute(insert, ["movies"]).unwrap();
        conn.execute(insert, ["archive"]).unwrap();
        assert!(conn.execute(insert, ["movies"]).is_err());

        let stats = get_database_stats(&conn).unwrap();
        assert_eq!(stats.document_count, 2);
        assert_eq!(stats.collection_count, 2);
        assert!(stats.size_bytes > 0);
    }

    #[test]
    fn test_integrity_check_passes_on_fresh_schema() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        verify_database_integrity(&conn).unwrap();
    }
}
