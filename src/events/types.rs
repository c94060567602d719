// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - Deletes carry no title: the record is gone

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub trait DomainEvent: std::fmt::Debug + Clone {
    fn event_id(&self) -> Uuid;

    fn occurred_at(&self) -> DateTime<Utc>;

    /// Type name, as written to the event log
    fn event_type(&self) -> &'static str;
}

/// Wires a struct with `event_id` and `occurred_at` fields into `DomainEvent`
macro_rules! domain_event {
    ($($event:ident),+ $(,)?) => {
        $(
            impl DomainEvent for $event {
                fn event_id(&self) -> Uuid {
                    self.event_id
                }

                fn occurred_at(&self) -> DateTime<Utc> {
                    self.occurred_at
                }

                fn event_type(&self) -> &'static str {
                    stringify!($event)
                }
            }
        )+
    };
}

// ============================================================================
// MOVIE EVENTS
// ============================================================================

domain_event!(MovieAdded, MovieUpdated, MovieDeleted);

/// Emitted after a new movie document has been written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: String,
    pub title: String,
}

impl MovieAdded {
    pub fn new(movie_id: String, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
        }
    }
}

/// Emitted after an existing movie document has been overwritten
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: String,
    pub title: String,
}

impl MovieUpdated {
    pub fn new(movie_id: String, title: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
        }
    }
}

/// Emitted after a delete has been issued for a movie document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: String,
}

impl MovieDeleted {
    pub fn new(movie_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        let id = "abc".to_string();
        assert_eq!(MovieAdded::new(id.clone(), "Heat".into()).event_type(), "MovieAdded");
        assert_eq!(MovieUpdated::new(id.clone(), "Heat".into()).event_type(), "MovieUpdated");
        assert_eq!(MovieDeleted::new(id).event_type(), "MovieDeleted");
    }

    #[test]
    fn test_each_event_gets_its_own_id() {
        let first = MovieDeleted::new("abc".to_string());
        let second = MovieDeleted::new("abc".to_string());
        assert_ne!(first.event_id(), second.event_id());
    }
}
