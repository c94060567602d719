// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Message shown when a title is already taken by another movie
pub const DUPLICATE_TITLE_MESSAGE: &str = "A movie with this title already exists!";

/// Message shown when a movie fails the write-boundary invariants
pub const INVALID_MOVIE_MESSAGE: &str = "Invalid movie data!";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}", DUPLICATE_TITLE_MESSAGE)]
    DuplicateTitle,

    /// Write rejected before reaching storage
    #[error("{}", INVALID_MOVIE_MESSAGE)]
    InvalidMovie(DomainError),

    #[error("Resource not found")]
    NotFound,

    /// Failure reported by the document store itself
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Backend(format!("Storage task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
