// src/services/movie_provider.rs
//
// Movie Provider - data access for the shared catalog
//
// CRITICAL RULES:
// - The only component that writes movie documents
// - Validates every record before it reaches storage
// - Titles are unique: every write checks the collection first
// - Emits a domain event after each successful write
//
// The title check and the write are two separate backend calls. Two clients
// racing on the same title can both pass the check; the collection offers no
// conditional write to close that gap.

use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{validate_movie, DomainError, Movie};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, MovieAdded, MovieDeleted, MovieUpdated};
use crate::repositories::{Document, DocumentCollection};
use crate::services::movie_listener::MovieListener;

/// Document field holding the uniqueness key
const TITLE_FIELD: &str = "title";

/// Observer for the catalog subscription
pub trait DataStatus: Send + Sync {
    /// Called with the complete list after every snapshot
    fn on_data_updated(&self, movies: &[Movie]);

    fn on_error(&self, error: &str);
}

pub struct MovieProvider {
    collection: Arc<dyn DocumentCollection>,
    /// Mirror of the latest snapshot, replaced wholesale by the listener
    movies: Arc<RwLock<Vec<Movie>>>,
    event_bus: Arc<EventBus>,
}

impl MovieProvider {
    pub fn new(collection: Arc<dyn DocumentCollection>, event_bus: Arc<EventBus>) -> Self {
        Self {
            collection,
            movies: Arc::new(RwLock::new(Vec::new())),
            event_bus,
        }
    }

    /// Current contents of the mirror
    ///
    /// Empty until a listener has delivered its first snapshot.
    pub fn movies(&self) -> Vec<Movie> {
        self.movies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store a new movie and assign its backend identifier
    ///
    /// On failure nothing is written and `movie` is left untouched.
    pub async fn add_movie(&self, movie: &mut Movie) -> AppResult<()> {
        if !self.documents_with_title(&movie.title).await?.is_empty() {
            log::info!("Rejected duplicate title '{}'", movie.title);
            return Err(AppError::DuplicateTitle);
        }

        let document_id = self.collection.new_document_id();
        let mut candidate = movie.clone();
        candidate.id = document_id.clone();
        validate_movie(&candidate, &document_id).map_err(AppError::InvalidMovie)?;

        self.collection
            .set(&document_id, candidate.to_document_data()?)
            .await?;

        *movie = candidate;
        self.event_bus
            .emit(MovieAdded::new(movie.id.clone(), movie.title.clone()));
        Ok(())
    }

    /// Whether a movie with exactly this title is stored
    ///
    /// Backend failures are logged and reported as "does not exist".
    pub async fn movie_exists(&self, title: &str) -> bool {
        match self.documents_with_title(title).await {
            Ok(documents) => !documents.is_empty(),
            Err(e) => {
                log::warn!("Existence check for '{}' failed: {}", title, e);
                false
            }
        }
    }

    pub async fn get_movie(&self, id: &str) -> AppResult<Option<Movie>> {
        match self.collection.get(id).await? {
            Some(document) => Ok(Some(Movie::from_document(&document)?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_title(&self, title: &str) -> AppResult<Option<Movie>> {
        match self.documents_with_title(title).await?.first() {
            Some(document) => Ok(Some(Movie::from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Read the whole collection directly, bypassing the mirror
    pub async fn fetch_movies(&self) -> AppResult<Vec<Movie>> {
        self.collection
            .list_all()
            .await?
            .iter()
            .map(|document| Movie::from_document(document).map_err(AppError::from))
            .collect()
    }

    /// Replace title, genre and year of a stored movie
    ///
    /// `movie` is only mutated once the write has succeeded.
    pub async fn update_movie(
        &self,
        movie: &mut Movie,
        title: &str,
        genre: &str,
        year: i32,
    ) -> AppResult<()> {
        let candidate = Movie {
            id: movie.id.clone(),
            title: title.to_string(),
            genre: genre.to_string(),
            year,
        };
        validate_movie(&candidate, &movie.id).map_err(AppError::InvalidMovie)?;

        let title_taken = self
            .documents_with_title(title)
            .await?
            .iter()
            .any(|document| document.id != movie.id);
        if title_taken {
            log::info!("Rejected rename of {} to taken title '{}'", movie.id, title);
            return Err(AppError::DuplicateTitle);
        }

        if self.collection.get(&movie.id).await?.is_none() {
            return Err(AppError::NotFound);
        }

        self.collection
            .set(&movie.id, candidate.to_document_data()?)
            .await?;

        *movie = candidate;
        self.event_bus
            .emit(MovieUpdated::new(movie.id.clone(), movie.title.clone()));
        Ok(())
    }

    /// Issue a single backend delete for the movie's document
    pub async fn delete_movie(&self, movie: &Movie) -> AppResult<()> {
        if !movie.has_id() {
            return Err(AppError::InvalidMovie(DomainError::MissingIdentifier));
        }

        self.collection.delete(&movie.id).await?;

        self.event_bus.emit(MovieDeleted::new(movie.id.clone()));
        Ok(())
    }

    /// Subscribe to the collection and keep the mirror current
    ///
    /// Must be called from within a tokio runtime.
    pub fn listen_for_updates(&self, observer: Arc<dyn DataStatus>) -> MovieListener {
        MovieListener::start(
            self.collection.listen(),
            Arc::clone(&self.movies),
            observer,
        )
    }

    async fn documents_with_title(&self, title: &str) -> AppResult<Vec<Document>> {
        self.collection
            .where_equal_to(TITLE_FIELD, &serde_json::Value::from(title))
            .await
    }
}
