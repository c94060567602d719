// src/repositories/document_collection.rs
//
// Backend contract for a named collection of JSON documents.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::{AppError, AppResult};

/// Collection the catalog lives in unless configured otherwise
pub const DEFAULT_COLLECTION: &str = "movies";

/// A stored document: identifier plus JSON body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: serde_json::Value,
}

/// The full record set of a collection at one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionSnapshot {
    /// Increases with every published snapshot
    pub version: u64,
    pub documents: Vec<Document>,
}

/// What a listener receives: a snapshot or the backend's error message
pub type SnapshotEvent = Result<CollectionSnapshot, String>;

// ---------------------------------------------------------------------
// Collection contract
// ---------------------------------------------------------------------
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Collection name
    fn name(&self) -> String;

    /// Allocate a fresh document identifier without writing anything
    fn new_document_id(&self) -> String;

    /// Documents whose top-level `field` equals `value`
    async fn where_equal_to(
        &self,
        field: &str,
        value: &serde_json::Value,
    ) -> AppResult<Vec<Document>>;

    async fn get(&self, id: &str) -> AppResult<Option<Document>>;

    /// Create or overwrite the document `id`
    async fn set(&self, id: &str, data: serde_json::Value) -> AppResult<()>;

    /// Remove the document `id`; removing a missing document is not an error
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Every document, ordered by identifier
    async fn list_all(&self) -> AppResult<Vec<Document>>;

    /// Subscribe to full snapshots; the receiver starts at the latest one
    fn listen(&self) -> watch::Receiver<SnapshotEvent>;
}

/// Field names are restricted so they can be embedded in a JSON path
pub fn validate_field_name(field: &str) -> AppResult<()> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(AppError::Backend(format!("Invalid field name: '{}'", field)));
    }
    Ok(())
}

/// Only scalar values can be compared for equality
pub(crate) fn ensure_queryable(value: &serde_json::Value) -> AppResult<()> {
    match value {
        serde_json::Value::String(_)
        | serde_json::Value::Number(_)
        | serde_json::Value::Bool(_) => Ok(()),
        other => Err(AppError::Backend(format!(
            "Unsupported equality value: {}",
            other
        ))),
    }
}
