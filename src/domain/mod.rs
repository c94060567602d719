// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod movie;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use movie::{validate_movie, Movie};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of the catalog record invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Movie has no identifier assigned")]
    MissingIdentifier,

    #[error("Movie identifier '{actual}' does not match document '{expected}'")]
    IdentifierMismatch { expected: String, actual: String },

    #[error("Movie title cannot be empty")]
    EmptyTitle,

    #[error("Movie genre cannot be empty")]
    EmptyGenre,

    #[error("Movie year must be positive, got {0}")]
    NonPositiveYear(i32),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
