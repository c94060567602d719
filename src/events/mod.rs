// src/events/mod.rs
//
// Internal Event System - Public API
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod handlers;
pub mod snapshot;
pub mod types;

// ============================================================================
// PUBLIC EXPORTS
// ============================================================================

pub use types::{DomainEvent, MovieAdded, MovieDeleted, MovieUpdated};

pub use bus::{EventBus, EventLogEntry};

pub use handlers::register_audit_handlers;

pub use snapshot::SnapshotPublisher;
