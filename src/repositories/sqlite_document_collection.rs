// src/repositories/sqlite_document_collection.rs
//
// Document collection persisted in SQLite
//
// RULES:
// - One row per document, JSON body in `data`
// - Blocking SQLite work runs on the blocking thread pool
// - Every successful write republishes the collection snapshot
// - Explicit SQL only

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, types::Value as SqlValue, Connection, Row};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::db::{get_connection, initialize_database, ConnectionPool, PooledConn};
use crate::error::{AppError, AppResult};
use crate::events::SnapshotPublisher;
use crate::repositories::document_collection::{
    ensure_queryable, validate_field_name, Document, DocumentCollection, SnapshotEvent,
};

pub struct SqliteDocumentCollection {
    name: String,
    pool: Arc<ConnectionPool>,
    publisher: Arc<SnapshotPublisher>,
}

impl SqliteDocumentCollection {
    /// Open the collection `name`, creating the schema on first use
    ///
    /// The current contents become the initial snapshot.
    pub fn open(pool: Arc<ConnectionPool>, name: impl Into<String>) -> AppResult<Self> {
        let name = name.into();
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        let documents = load_documents(&conn, &name)?;

        log::debug!(
            "Opened collection '{}' with {} documents",
            name,
            documents.len()
        );

        Ok(Self {
            name,
            pool,
            publisher: Arc::new(SnapshotPublisher::new(documents)),
        })
    }

    /// Run `f` with a pooled connection on the blocking thread pool
    async fn with_connection<T, F>(&self, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> AppResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let conn = get_connection(&pool)?;
            f(&*conn)
        })
        .await?
    }

    /// Watch the database for commits made by other connections
    ///
    /// Holds one pooled connection for as long as the poller runs.
    pub fn start_change_polling(&self, interval: Duration) -> AppResult<ChangePoller> {
        let conn = get_connection(&self.pool)?;
        let last_version = data_version(&conn)?;
        let name = self.name.clone();
        let publisher = Arc::clone(&self.publisher);

        let task = tokio::spawn(poll_changes(conn, name, publisher, interval, last_version));

        log::debug!(
            "Polling collection '{}' for external changes every {:?}",
            self.name,
            interval
        );
        Ok(ChangePoller { task: Some(task) })
    }
}

#[async_trait]
impl DocumentCollection for SqliteDocumentCollection {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn new_document_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }

    async fn where_equal_to(
        &self,
        field: &str,
        value: &serde_json::Value,
    ) -> AppResult<Vec<Document>> {
        validate_field_name(field)?;
        ensure_queryable(value)?;

        // Field names are validated, so the path can be part of the statement
        let sql = format!(
            "SELECT id, data FROM documents
             WHERE collection = ?1 AND json_extract(data, '$.{}') = ?2
             ORDER BY id",
            field
        );
        let name = self.name.clone();
        let bound = to_sql_value(value);

        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let documents = stmt
                .query_map(params![name, bound], row_to_document)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(documents)
        })
        .await
    }

    async fn get(&self, id: &str) -> AppResult<Option<Document>> {
        let name = self.name.clone();
        let id = id.to_string();

        self.with_connection(move |conn| {
            let mut stmt =
                conn.prepare("SELECT id, data FROM documents WHERE collection = ?1 AND id = ?2")?;
            match stmt.query_row(params![name, id], row_to_document) {
                Ok(document) => Ok(Some(document)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(AppError::Database(e)),
            }
        })
        .await
    }

    async fn set(&self, id: &str, data: serde_json::Value) -> AppResult<()> {
        let name = self.name.clone();
        let id = id.to_string();
        let body = serde_json::to_string(&data)?;
        let publisher = Arc::clone(&self.publisher);

        self.with_connection(move |conn| {
            let now = Utc::now().to_rfc3339();
            conn.execute(
                "INSERT INTO documents (collection, id, data, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 ON CONFLICT (collection, id)
                 DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
                params![name, id, body, now],
            )?;
            republish(conn, &name, &publisher);
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let name = self.name.clone();
        let id = id.to_string();
        let publisher = Arc::clone(&self.publisher);

        self.with_connection(move |conn| {
            let rows_affected = conn.execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                params![name, id],
            )?;
            if rows_affected > 0 {
                republish(conn, &name, &publisher);
            }
            Ok(())
        })
        .await
    }

    async fn list_all(&self) -> AppResult<Vec<Document>> {
        let name = self.name.clone();
        self.with_connection(move |conn| load_documents(conn, &name))
            .await
    }

    fn listen(&self) -> watch::Receiver<SnapshotEvent> {
        self.publisher.subscribe()
    }
}

// ============================================================================
// CHANGE POLLING
// ============================================================================

/// Handle to the background change poller; stops it when dropped
pub struct ChangePoller {
    task: Option<JoinHandle<()>>,
}

impl ChangePoller {
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for ChangePoller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_changes(
    mut conn: PooledConn,
    name: String,
    publisher: Arc<SnapshotPublisher>,
    interval: Duration,
    mut last_version: i64,
) {
    loop {
        tokio::time::sleep(interval).await;

        let task_name = name.clone();
        let task_publisher = Arc::clone(&publisher);
        let outcome = tokio::task::spawn_blocking(move || {
            let result = poll_once(&conn, &task_name, &task_publisher, last_version);
            (conn, result)
        })
        .await;

        match outcome {
            Ok((returned, Ok(version))) => {
                conn = returned;
                last_version = version;
            }
            Ok((returned, Err(e))) => {
                conn = returned;
                log::warn!("Change poll for '{}' failed: {}", name, e);
                publisher.publish_error(e.to_string());
            }
            Err(e) => {
                log::error!("Change poller for '{}' stopped: {}", name, e);
                break;
            }
        }
    }
}

fn poll_once(
    conn: &Connection,
    name: &str,
    publisher: &SnapshotPublisher,
    last_version: i64,
) -> AppResult<i64> {
    let version = data_version(conn)?;
    if version != last_version {
        if let Some(snapshot_version) = publisher.refresh(|| load_documents(conn, name))? {
            log::debug!(
                "External change in '{}' published as snapshot {}",
                name,
                snapshot_version
            );
        }
    }
    Ok(version)
}

fn data_version(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("PRAGMA data_version", [], |row| row.get(0))?)
}

// ============================================================================
// ROW MAPPING
// ============================================================================

/// Reload and publish after a write; a failed reload is reported to listeners
fn republish(conn: &Connection, name: &str, publisher: &SnapshotPublisher) {
    if let Err(e) = publisher.refresh(|| load_documents(conn, name)) {
        log::warn!("Snapshot refresh for '{}' failed: {}", name, e);
        publisher.publish_error(e.to_string());
    }
}

fn load_documents(conn: &Connection, name: &str) -> AppResult<Vec<Document>> {
    let mut stmt =
        conn.prepare("SELECT id, data FROM documents WHERE collection = ?1 ORDER BY id")?;
    let documents = stmt
        .query_map(params![name], row_to_document)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(documents)
}

/// Map database row to Document - returns rusqlite::Error for query_map compatibility
fn row_to_document(row: &Row) -> Result<Document, rusqlite::Error> {
    let id: String = row.get("id")?;
    let body: String = row.get("data")?;
    let data = serde_json::from_str(&body).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Document { id, data })
}

fn to_sql_value(value: &serde_json::Value) -> SqlValue {
    match value {
        serde_json::Value::String(s) => SqlValue::Text(s.clone()),
        serde_json::Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null),
        },
        _ => SqlValue::Null,
    }
}
