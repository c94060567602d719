// src/services/movie_listener.rs
//
// Movie Listener - background subscription to the catalog collection
//
// CRITICAL RULES:
// - Runs in a background task
// - Every snapshot replaces the whole mirror (no diffing)
// - Errors are forwarded, the mirror keeps its last good contents
// - Does NOT write to the collection

use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::Movie;
use crate::repositories::SnapshotEvent;
use crate::services::movie_provider::DataStatus;

pub struct MovieListener {
    task_handle: Mutex<Option<JoinHandle<()>>>,
}

impl MovieListener {
    pub(crate) fn start(
        receiver: watch::Receiver<SnapshotEvent>,
        mirror: Arc<RwLock<Vec<Movie>>>,
        observer: Arc<dyn DataStatus>,
    ) -> Self {
        let task = tokio::spawn(run_listener(receiver, mirror, observer));
        Self {
            task_handle: Mutex::new(Some(task)),
        }
    }

    pub fn stop(&self) {
        let mut handle = self
            .task_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = handle.take() {
            task.abort();
        }
    }

    /// False once stopped or once the collection has gone away
    pub fn is_active(&self) -> bool {
        self.task_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for MovieListener {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_listener(
    mut receiver: watch::Receiver<SnapshotEvent>,
    mirror: Arc<RwLock<Vec<Movie>>>,
    observer: Arc<dyn DataStatus>,
) {
    loop {
        let event = receiver.borrow_and_update().clone();
        apply_snapshot(event, &mirror, observer.as_ref());

        if receiver.changed().await.is_err() {
            log::debug!("Collection closed, listener exiting");
            break;
        }
    }
}

fn apply_snapshot(event: SnapshotEvent, mirror: &RwLock<Vec<Movie>>, observer: &dyn DataStatus) {
    let snapshot = match event {
        Ok(snapshot) => snapshot,
        Err(message) => {
            log::warn!("Catalog listener error: {}", message);
            observer.on_error(&message);
            return;
        }
    };

    let mut movies = Vec::with_capacity(snapshot.documents.len());
    for document in &snapshot.documents {
        match Movie::from_document(document) {
            Ok(movie) => movies.push(movie),
            Err(e) => {
                log::warn!("Skipping malformed document {}: {}", document.id, e);
                observer.on_error(&format!("Malformed document {}: {}", document.id, e));
            }
        }
    }

    {
        let mut current = mirror.write().unwrap_or_else(PoisonError::into_inner);
        current.clone_from(&movies);
    }

    log::debug!(
        "Snapshot {} applied: {} movies",
        snapshot.version,
        movies.len()
    );
    observer.on_data_updated(&movies);
}
