use serde::{Deserialize, Serialize};

use crate::repositories::Document;

/// A single catalog record
///
/// The title doubles as the uniqueness key inside the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Backend-assigned document identifier, empty until the record is stored
    #[serde(default)]
    pub id: String,

    pub title: String,

    pub genre: String,

    /// Release year
    pub year: i32,
}

impl Movie {
    /// Create a record that has not been stored yet
    pub fn new(title: impl Into<String>, genre: impl Into<String>, year: i32) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            genre: genre.into(),
            year,
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Decode a stored document
    ///
    /// The document identifier wins over any `id` field found in the body.
    pub fn from_document(document: &Document) -> Result<Self, serde_json::Error> {
        let mut movie: Movie = serde_json::from_value(document.data.clone())?;
        if movie.id != document.id {
            if movie.has_id() {
                log::warn!(
                    "Document {} carries stale id field '{}'",
                    document.id,
                    movie.id
                );
            }
            movie.id = document.id.clone();
        }
        Ok(movie)
    }

    /// Encode the record as a document body
    pub fn to_document_data(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl std::fmt::Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) - {}", self.title, self.year, self.genre)
    }
}
