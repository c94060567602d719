// src/application/commands/movie_commands.rs
//
// Movie Command Handlers
//
// RULES:
// - Accept DTOs
// - Go through the dialogs so CLI and UI share one flow
// - Return DTOs
// - Never contain business logic

use crate::application::{
    dialogs::{DeleteDialog, MovieDialog},
    dto::*,
    error_handling::ToErrorResponse,
    state::AppState,
};
use crate::domain::Movie;
use crate::error::AppError;

/// List all movies, ordered by title
pub async fn list_movies(state: &AppState) -> Result<Vec<MovieDto>, String> {
    let mut movies = state
        .movie_provider
        .fetch_movies()
        .await
        .to_error_response()?;

    movies.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(movies.into_iter().map(MovieDto::from).collect())
}

pub async fn get_movie(movie_id: &str, state: &AppState) -> Result<Option<MovieDto>, String> {
    let movie = state
        .movie_provider
        .get_movie(movie_id)
        .await
        .to_error_response()?;

    Ok(movie.map(MovieDto::from))
}

pub async fn create_movie(dto: CreateMovieDto, state: &AppState) -> Result<MovieDto, String> {
    let mut dialog = MovieDialog::add();
    let movie = dialog
        .submit(&state.movie_provider, &dto.to_form())
        .await
        .to_error_response()?;

    Ok(MovieDto::from(movie))
}

pub async fn update_movie(dto: UpdateMovieDto, state: &AppState) -> Result<MovieDto, String> {
    let current = load_movie(&dto.id, state).await?;
    let form = dto.to_form(&current);

    let mut dialog = MovieDialog::edit(current);
    let movie = dialog
        .submit(&state.movie_provider, &form)
        .await
        .to_error_response()?;

    Ok(MovieDto::from(movie))
}

pub async fn delete_movie(movie_id: &str, state: &AppState) -> Result<MovieDto, String> {
    let movie = load_movie(movie_id, state).await?;

    let deleted = DeleteDialog::new(movie)
        .confirm(&state.movie_provider)
        .await
        .to_error_response()?;

    Ok(MovieDto::from(deleted))
}

async fn load_movie(movie_id: &str, state: &AppState) -> Result<Movie, String> {
    state
        .movie_provider
        .get_movie(movie_id)
        .await
        .and_then(|movie| movie.ok_or(AppError::NotFound))
        .to_error_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error_handling::{ErrorResponse, ErrorType};
    use crate::application::forms::NON_POSITIVE_YEAR_MESSAGE;
    use crate::events::EventBus;
    use crate::repositories::{
        Document, DocumentCollection, InMemoryDocumentCollection, MockDocumentCollection,
    };
    use crate::services::MovieProvider;
    use mockall::Sequence;
    use serde_json::json;
    use std::sync::Arc;

    fn state() -> AppState {
        let collection: Arc<dyn DocumentCollection> =
            Arc::new(InMemoryDocumentCollection::new("movies"));
        let event_bus = Arc::new(EventBus::new());
        let provider = Arc::new(MovieProvider::new(collection, Arc::clone(&event_bus)));
        AppState::new(event_bus, provider)
    }

    fn create_dto(title: &str, genre: &str, year: &str) -> CreateMovieDto {
        CreateMovieDto {
            title: title.to_string(),
            genre: genre.to_string(),
            year: year.to_string(),
        }
    }

    fn error_type(raw: &str) -> ErrorType {
        serde_json::from_str::<ErrorResponse>(raw).unwrap().error_type
    }

    #[tokio::test]
    async fn test_create_then_list_sorted() {
        let state = state();
        create_movie(create_dto("Heat", "Crime", "1995"), &state).await.unwrap();
        create_movie(create_dto("Alien", "Horror", "1979"), &state).await.unwrap();

        let titles: Vec<String> = list_movies(&state)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["Alien", "Heat"]);
    }

    #[tokio::test]
    async fn test_create_duplicate_returns_duplicate_response() {
        let state = state();
        create_movie(create_dto("Heat", "Crime", "1995"), &state).await.unwrap();

        let raw = create_movie(create_dto("Heat", "Crime", "1995"), &state)
            .await
            .unwrap_err();
        let response: ErrorResponse = serde_json::from_str(&raw).unwrap();
        assert_eq!(response.error_type, ErrorType::Duplicate);
        assert_eq!(response.message, "A movie with this title already exists!");
    }

    #[tokio::test]
    async fn test_create_invalid_form_returns_validation_response() {
        let state = state();

        let raw = create_movie(create_dto("Heat", "Crime", "0"), &state)
            .await
            .unwrap_err();
        let response: ErrorResponse = serde_json::from_str(&raw).unwrap();
        assert_eq!(response.error_type, ErrorType::Validation);
        assert_eq!(response.message, NON_POSITIVE_YEAR_MESSAGE);
        assert_eq!(response.details.as_deref(), Some("year"));
    }

    #[tokio::test]
    async fn test_update_backend_failure_returns_database_response() {
        let mut mock = MockDocumentCollection::new();
        let mut seq = Sequence::new();
        mock.expect_where_equal_to()
            .returning(|_, _| Ok(Vec::new()));
        mock.expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id| {
                Ok(Some(Document {
                    id: id.to_string(),
                    data: json!({"title": "Heat", "genre": "Crime", "year": 1995}),
                }))
            });
        mock.expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::Backend("connection reset".to_string())));
        mock.expect_set().never();

        let event_bus = Arc::new(EventBus::new());
        let provider = Arc::new(MovieProvider::new(Arc::new(mock), Arc::clone(&event_bus)));
        let state = AppState::new(event_bus, provider);

        let raw = update_movie(
            UpdateMovieDto {
                id: "heat".to_string(),
                genre: Some("Thriller".to_string()),
                ..Default::default()
            },
            &state,
        )
        .await
        .unwrap_err();
        let response: ErrorResponse = serde_json::from_str(&raw).unwrap();
        assert_eq!(response.error_type, ErrorType::Database);
        assert_eq!(response.details.as_deref(), Some("connection reset"));
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let state = state();
        let created = create_movie(create_dto("Heat", "Crime", "1995"), &state)
            .await
            .unwrap();

        let updated = update_movie(
            UpdateMovieDto {
                id: created.id.clone(),
                year: Some("1996".to_string()),
                ..Default::default()
            },
            &state,
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Heat");
        assert_eq!(updated.genre, "Crime");
        assert_eq!(updated.year, 1996);
        assert_eq!(get_movie(&created.id, &state).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let state = state();

        let raw = delete_movie("missing", &state).await.unwrap_err();
        assert_eq!(error_type(&raw), ErrorType::NotFound);

        let raw = update_movie(
            UpdateMovieDto {
                id: "missing".to_string(),
                ..Default::default()
            },
            &state,
        )
        .await
        .unwrap_err();
        assert_eq!(error_type(&raw), ErrorType::NotFound);
    }

    #[tokio::test]
    async fn test_delete_removes_movie() {
        let state = state();
        let created = create_movie(create_dto("Heat", "Crime", "1995"), &state)
            .await
            .unwrap();

        let deleted = delete_movie(&created.id, &state).await.unwrap();
        assert_eq!(deleted, created);
        assert!(list_movies(&state).await.unwrap().is_empty());
    }
}
