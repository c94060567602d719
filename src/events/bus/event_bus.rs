// src/events/bus/event_bus.rs
//
// Synchronous, typed publish/subscribe.
//
// DESIGN PRINCIPLES:
// 1. Handlers run on the emitting thread, in subscription order
// 2. No lock is held while a handler runs
// 3. Every emission is logged and kept in a bounded history
// 4. A panicking handler never stops the ones after it

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::events::types::DomainEvent;

/// Type-erased handler; downcasts to the concrete event inside
type EventHandler = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Oldest entries are dropped past this many emissions
const EVENT_LOG_CAPACITY: usize = 1024;

/// One recorded emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogEntry {
    pub event_type: &'static str,
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub handler_count: usize,
}

/// Lets the provider announce writes without knowing who reacts to them.
///
/// Clones share handlers and history.
#[derive(Clone)]
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,
    event_log: Arc<RwLock<VecDeque<EventLogEntry>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    /// Register `handler` for events of type `E`
    ///
    /// ```ignore
    /// bus.subscribe::<MovieAdded, _>(|event| {
    ///     println!("Movie added: {}", event.title);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let erased: EventHandler = Arc::new(move |event: &dyn Any| match event.downcast_ref::<E>() {
            Some(event) => handler(event),
            None => log::error!(
                "Event routed to the wrong handler, expected {}",
                std::any::type_name::<E>()
            ),
        });

        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(TypeId::of::<E>())
            .or_default()
            .push(erased);
    }

    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        // Snapshot the handler list so handlers may subscribe or emit themselves
        let handlers: Vec<EventHandler> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<E>())
            .cloned()
            .unwrap_or_default();

        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            event.event_type(),
            event.event_id(),
            handlers.len()
        );
        self.record(EventLogEntry {
            event_type: event.event_type(),
            event_id: event.event_id(),
            occurred_at: event.occurred_at(),
            handler_count: handlers.len(),
        });

        for (idx, handler) in handlers.iter().enumerate() {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| handler(&event as &dyn Any))) {
                log::error!(
                    "Handler {} for {} panicked: {:?}",
                    idx,
                    event.event_type(),
                    panic
                );
            }
        }
    }

    /// Recorded emissions, oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn clear_event_log(&self) {
        self.event_log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn subscriber_count<E: 'static>(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    fn record(&self, entry: EventLogEntry) {
        let mut log = self.event_log.write().unwrap_or_else(PoisonError::into_inner);
        if log.len() == EVENT_LOG_CAPACITY {
            log.pop_front();
        }
        log.push_back(entry);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
