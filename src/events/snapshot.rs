// src/events/snapshot.rs
//
// Snapshot fan-out for collection listeners.
//
// A watch channel always holds the latest full record set; listeners that
// fall behind skip straight to the newest snapshot.

use std::sync::{Mutex, PoisonError};
use tokio::sync::watch;

use crate::error::AppResult;
use crate::repositories::{CollectionSnapshot, Document, SnapshotEvent};

pub struct SnapshotPublisher {
    sender: watch::Sender<SnapshotEvent>,
    /// Version of the last published snapshot; also serializes publishers
    version: Mutex<u64>,
}

impl SnapshotPublisher {
    /// Start with `documents` as snapshot version 0
    pub fn new(documents: Vec<Document>) -> Self {
        let (sender, _receiver) = watch::channel(Ok(CollectionSnapshot {
            version: 0,
            documents,
        }));
        Self {
            sender,
            version: Mutex::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SnapshotEvent> {
        self.sender.subscribe()
    }

    /// Publish a new full snapshot and return its version
    pub fn publish(&self, documents: Vec<Document>) -> u64 {
        let mut version = self.version.lock().unwrap_or_else(PoisonError::into_inner);
        *version += 1;
        let _ = self.sender.send_replace(Ok(CollectionSnapshot {
            version: *version,
            documents,
        }));
        *version
    }

    /// Publish only when the document set differs from the latest snapshot
    pub fn publish_if_changed(&self, documents: Vec<Document>) -> Option<u64> {
        self.refresh(|| Ok(documents)).ok().flatten()
    }

    /// Reload the document set and publish it when it changed
    ///
    /// `load` runs under the publisher lock, so a reload that started later
    /// can never be overwritten by one that started earlier.
    pub fn refresh<F>(&self, load: F) -> AppResult<Option<u64>>
    where
        F: FnOnce() -> AppResult<Vec<Document>>,
    {
        let mut version = self.version.lock().unwrap_or_else(PoisonError::into_inner);
        let documents = load()?;
        let unchanged = matches!(
            &*self.sender.borrow(),
            Ok(current) if current.documents == documents
        );
        if unchanged {
            return Ok(None);
        }
        *version += 1;
        let _ = self.sender.send_replace(Ok(CollectionSnapshot {
            version: *version,
            documents,
        }));
        Ok(Some(*version))
    }

    /// Forward a failure to every listener
    pub fn publish_error(&self, message: impl Into<String>) {
        let _guard = self.version.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = self.sender.send_replace(Err(message.into()));
    }

    pub fn current_version(&self) -> u64 {
        *self.version.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, title: &str) -> Document {
        Document {
            id: id.to_string(),
            data: json!({ "title": title }),
        }
    }

    #[test]
    fn test_initial_snapshot_is_version_zero() {
        let publisher = SnapshotPublisher::new(vec![doc("1", "Heat")]);
        let receiver = publisher.subscribe();

        let snapshot = receiver.borrow().clone().unwrap();
        assert_eq!(snapshot.version, 0);
        assert_eq!(snapshot.documents.len(), 1);
    }

    #[test]
    fn test_publish_bumps_version_and_notifies() {
        let publisher = SnapshotPublisher::new(Vec::new());
        let mut receiver = publisher.subscribe();
        receiver.borrow_and_update();

        assert_eq!(publisher.publish(vec![doc("1", "Heat")]), 1);
        assert!(receiver.has_changed().unwrap());

        let snapshot = receiver.borrow_and_update().clone().unwrap();
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.documents[0].id, "1");
    }

    #[test]
    fn test_publish_if_changed_skips_identical_sets() {
        let publisher = SnapshotPublisher::new(vec![doc("1", "Heat")]);

        assert_eq!(publisher.publish_if_changed(vec![doc("1", "Heat")]), None);
        assert_eq!(publisher.current_version(), 0);

        assert_eq!(publisher.publish_if_changed(vec![doc("1", "Ronin")]), Some(1));
    }

    #[test]
    fn test_refresh_propagates_load_errors() {
        let publisher = SnapshotPublisher::new(Vec::new());

        let result = publisher.refresh(|| Err(crate::error::AppError::NotFound));
        assert!(result.is_err());
        assert_eq!(publisher.current_version(), 0);

        assert_eq!(publisher.refresh(|| Ok(vec![doc("1", "Heat")])).unwrap(), Some(1));
        assert_eq!(publisher.refresh(|| Ok(vec![doc("1", "Heat")])).unwrap(), None);
    }

    #[test]
    fn test_publish_error_reaches_listeners() {
        let publisher = SnapshotPublisher::new(Vec::new());
        let receiver = publisher.subscribe();
        assert_eq!(publisher.listener_count(), 1);

        publisher.publish_error("disk I/O error");

        assert_eq!(
            receiver.borrow().clone().unwrap_err(),
            "disk I/O error".to_string()
        );
    }
}
