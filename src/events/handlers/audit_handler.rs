// src/events/handlers/audit_handler.rs
//
// Writes a log line for every catalog change.

use crate::events::types::{MovieAdded, MovieDeleted, MovieUpdated};
use crate::events::EventBus;

/// Registers the audit log handlers with the event bus.
pub fn register_audit_handlers(bus: &EventBus) {
    bus.subscribe::<MovieAdded, _>(|event| {
        log::info!("[CATALOG] added '{}' as {}", event.title, event.movie_id);
    });

    bus.subscribe::<MovieUpdated, _>(|event| {
        log::info!("[CATALOG] updated {} -> '{}'", event.movie_id, event.title);
    });

    bus.subscribe::<MovieDeleted, _>(|event| {
        log::info!("[CATALOG] deleted {}", event.movie_id);
    });

    log::debug!("[CATALOG] audit handlers registered");
}
