// src/lib.rs
// MovieDeck - shared movie catalog client
//
// Architecture:
// - Domain-centric: record invariants live in the domain
// - One data-access layer: MovieProvider is the only writer
// - Backend-agnostic: everything talks to a DocumentCollection
// - Snapshot-driven: readers follow the collection, never poll it themselves
// - Application Layer: forms, dialogs and commands for the CLI

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod config;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{validate_movie, DomainError, Movie};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    register_audit_handlers, DomainEvent, EventBus, EventLogEntry, MovieAdded,
    MovieDeleted, MovieUpdated,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Collections
// ============================================================================

pub use repositories::{
    CollectionSnapshot, Document, DocumentCollection, InMemoryDocumentCollection,
    SqliteDocumentCollection,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{DataStatus, MovieListener, MovieProvider};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

pub use application::commands;
pub use application::dto;
