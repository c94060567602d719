// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - Input DTOs carry raw text, exactly as typed
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::application::forms::MovieForm;
use crate::domain::Movie;

// ============================================================================
// MOVIE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: String,
    pub title: String,
    pub genre: String,
    pub year: i32,
}

impl From<Movie> for MovieDto {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            genre: movie.genre,
            year: movie.year,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMovieDto {
    pub title: String,
    pub genre: String,
    pub year: String,
}

impl CreateMovieDto {
    pub fn to_form(&self) -> MovieForm {
        MovieForm::new(&self.title, &self.genre, &self.year)
    }
}

/// Partial edit; omitted fields keep the stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMovieDto {
    pub id: String,
    pub title: Option<String>,
    pub genre: Option<String>,
    pub year: Option<String>,
}

impl UpdateMovieDto {
    /// Merge the edit onto the current record
    pub fn to_form(&self, current: &Movie) -> MovieForm {
        let base = MovieForm::from_movie(current);
        MovieForm {
            title: self.title.clone().unwrap_or(base.title),
            genre: self.genre.clone().unwrap_or(base.genre),
            year: self.year.clone().unwrap_or(base.year),
        }
    }
}
