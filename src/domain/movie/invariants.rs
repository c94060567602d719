use super::entity::Movie;
use crate::domain::{DomainError, DomainResult};

/// Validates all Movie invariants against the document it is written to
/// These are the absolute rules a record must satisfy before it reaches storage
pub fn validate_movie(movie: &Movie, document_id: &str) -> DomainResult<()> {
    validate_identifier(&movie.id, document_id)?;
    validate_title(&movie.title)?;
    validate_genre(&movie.genre)?;
    validate_year(movie.year)?;
    Ok(())
}

/// Identifier must be assigned and must be the target document's identifier
fn validate_identifier(id: &str, document_id: &str) -> DomainResult<()> {
    if id.is_empty() || document_id.is_empty() {
        return Err(DomainError::MissingIdentifier);
    }
    if id != document_id {
        return Err(DomainError::IdentifierMismatch {
            expected: document_id.to_string(),
            actual: id.to_string(),
        });
    }
    Ok(())
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::EmptyTitle);
    }
    Ok(())
}

fn validate_genre(genre: &str) -> DomainResult<()> {
    if genre.trim().is_empty() {
        return Err(DomainError::EmptyGenre);
    }
    Ok(())
}

fn validate_year(year: i32) -> DomainResult<()> {
    if year <= 0 {
        return Err(DomainError::NonPositiveYear(year));
    }
    Ok(())
}

/// Invariants that must hold true for the Movie domain:
///
/// 1. Identifier is empty only before creation
/// 2. A stored record's identifier equals its document identifier
/// 3. Title cannot be empty and is unique within the collection
/// 4. Genre cannot be empty
/// 5. Year is strictly positive
///
/// Uniqueness (3) needs the collection and is enforced by the provider.
