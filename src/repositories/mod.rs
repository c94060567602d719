// src/repositories/mod.rs
//
// Repository layer: document collections
//
// CRITICAL RULES:
// - Collections are DUMB document stores
// - NO business logic
// - NO invariant enforcement
// - NO domain event emission (snapshots only)

pub mod document_collection;
pub mod in_memory_document_collection;
pub mod sqlite_document_collection;

pub use document_collection::{
    validate_field_name, CollectionSnapshot, Document, DocumentCollection, SnapshotEvent,
    DEFAULT_COLLECTION,
};
pub use in_memory_document_collection::InMemoryDocumentCollection;
pub use sqlite_document_collection::{ChangePoller, SqliteDocumentCollection};

#[cfg(test)]
pub use document_collection::MockDocumentCollection;
