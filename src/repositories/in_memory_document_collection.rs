// src/repositories/in_memory_document_collection.rs
//
// Embedded collection kept entirely in memory.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use crate::error::AppResult;
use crate::events::SnapshotPublisher;
use crate::repositories::document_collection::{
    ensure_queryable, validate_field_name, Document, DocumentCollection, SnapshotEvent,
    DEFAULT_COLLECTION,
};

pub struct InMemoryDocumentCollection {
    name: String,
    documents: RwLock<BTreeMap<String, serde_json::Value>>,
    publisher: SnapshotPublisher,
}

impl InMemoryDocumentCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: RwLock::new(BTreeMap::new()),
            publisher: SnapshotPublisher::new(Vec::new()),
        }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, serde_json::Value>> {
        self.documents.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot_documents(documents: &BTreeMap<String, serde_json::Value>) -> Vec<Document> {
        documents
            .iter()
            .map(|(id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            })
            .collect()
    }
}

impl Default for InMemoryDocumentCollection {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION)
    }
}

#[async_trait]
impl DocumentCollection for InMemoryDocumentCollection {
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

        let matches = self
            .read()
            .iter()
            .filter(|(_, data)| data.get(field) == Some(value))
            .map(|(id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            })
            .collect();
        Ok(matches)
    }

    async fn get(&self, id: &str) -> AppResult<Option<Document>> {
        Ok(self.read().get(id).map(|data| Document {
            id: id.to_string(),
            data: data.clone(),
        }))
    }

    async fn set(&self, id: &str, data: serde_json::Value) -> AppResult<()> {
        // The write lock is held while publishing so snapshots stay in write order
        let mut documents = self.documents.write().unwrap_or_else(PoisonError::into_inner);
        documents.insert(id.to_string(), data);
        self.publisher.publish(Self::snapshot_documents(&documents));
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let mut documents = self.documents.write().unwrap_or_else(PoisonError::into_inner);
        if documents.remove(id).is_some() {
            self.publisher.publish(Self::snapshot_documents(&documents));
        }
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Document>> {
        Ok(Self::snapshot_documents(&self.read()))
    }

    fn listen(&self) -> watch::Receiver<SnapshotEvent> {
        self.publisher.subscribe()
    }
}
