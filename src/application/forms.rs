// src/application/forms.rs
//
// Movie Form - raw dialog input and its validation
//
// RULES:
// - Holds text exactly as typed
// - Reports only the FIRST failing field
// - Year must be digits only (no sign, no spaces inside)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Movie;

pub const EMPTY_TITLE_MESSAGE: &str = "Movie name cannot be empty!";
pub const EMPTY_GENRE_MESSAGE: &str = "Movie genre cannot be empty!";
pub const EMPTY_YEAR_MESSAGE: &str = "Movie year cannot be empty!";
pub const NON_NUMERIC_YEAR_MESSAGE: &str = "Movie year must be numeric!";

/// Only reported after submit; the form itself accepts zero
pub const NON_POSITIVE_YEAR_MESSAGE: &str = "Movie year must be positive!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Title,
    Genre,
    Year,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::Title => "title",
            FormField::Genre => "genre",
            FormField::Year => "year",
        };
        f.write_str(name)
    }
}

/// Error attached to a single input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Validated, trimmed form contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieInput {
    pub title: String,
    pub genre: String,
    pub year: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieForm {
    pub title: String,
    pub genre: String,
    pub year: String,
}

impl MovieForm {
    pub fn new(
        title: impl Into<String>,
        genre: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            year: year.into(),
        }
    }

    /// Pre-fill for the edit dialog
    pub fn from_movie(movie: &Movie) -> Self {
        Self::new(&movie.title, &movie.genre, movie.year.to_string())
    }

    pub fn validate(&self) -> Result<MovieInput, FieldError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FieldError::new(FormField::Title, EMPTY_TITLE_MESSAGE));
        }

        let genre = self.genre.trim();
        if genre.is_empty() {
            return Err(FieldError::new(FormField::Genre, EMPTY_GENRE_MESSAGE));
        }

        let year = self.year.trim();
        if year.is_empty() {
            return Err(FieldError::new(FormField::Year, EMPTY_YEAR_MESSAGE));
        }
        if !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(FieldError::new(FormField::Year, NON_NUMERIC_YEAR_MESSAGE));
        }
        // Digits that overflow i32 are not a usable year either
        let year = year
            .parse::<i32>()
            .map_err(|_| FieldError::new(FormField::Year, NON_NUMERIC_YEAR_MESSAGE))?;

        Ok(MovieInput {
            title: title.to_string(),
            genre: genre.to_string(),
            year,
        })
    }
}
