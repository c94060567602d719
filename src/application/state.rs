// src/application/state.rs

use std::sync::Arc;

use crate::events::EventBus;
use crate::services::MovieProvider;

/// Shared application state.
/// Fields are Arc-wrapped so commands can run concurrently.
/// Everything is built in main.rs and handed in here.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub movie_provider: Arc<MovieProvider>,
}

impl AppState {
    pub fn new(event_bus: Arc<EventBus>, movie_provider: Arc<MovieProvider>) -> Self {
        Self {
            event_bus,
            movie_provider,
        }
    }
}
