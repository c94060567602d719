// src/application/dialogs.rs
//
// Movie Dialogs - add / edit / delete flows
//
// RULES:
// - The form is validated before the provider is called
// - A failed submit keeps the dialog open
// - Bad input is reported on its field; provider failures pass through
// - Dialogs hold no catalog state of their own

use thiserror::Error;

use crate::application::forms::{
    FieldError, FormField, MovieForm, EMPTY_GENRE_MESSAGE, EMPTY_TITLE_MESSAGE,
    NON_POSITIVE_YEAR_MESSAGE,
};
use crate::domain::{DomainError, Movie};
use crate::error::{AppError, AppResult};
use crate::services::MovieProvider;

/// Why a dialog submit failed
///
/// Only bad input becomes a field error. Everything else keeps its
/// provider error so callers can tell a duplicate from a dead backend.
#[derive(Debug, Error)]
pub enum DialogError {
    #[error("{0}")]
    Field(#[from] FieldError),

    #[error(transparent)]
    App(AppError),
}

impl From<AppError> for DialogError {
    fn from(error: AppError) -> Self {
        let field = match &error {
            AppError::InvalidMovie(DomainError::EmptyTitle) => {
                FieldError::new(FormField::Title, EMPTY_TITLE_MESSAGE)
            }
            AppError::InvalidMovie(DomainError::EmptyGenre) => {
                FieldError::new(FormField::Genre, EMPTY_GENRE_MESSAGE)
            }
            AppError::InvalidMovie(DomainError::NonPositiveYear(_)) => {
                FieldError::new(FormField::Year, NON_POSITIVE_YEAR_MESSAGE)
            }
            _ => return DialogError::App(error),
        };
        DialogError::Field(field)
    }
}

impl DialogError {
    /// Error to show under an input; non-field errors go under the title
    pub fn field_error(&self) -> FieldError {
        match self {
            DialogError::Field(field) => field.clone(),
            DialogError::App(error) => FieldError::new(FormField::Title, error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    Add,
    /// Editing the stored movie
    Edit(Movie),
}

#[derive(Debug)]
pub struct MovieDialog {
    mode: DialogMode,
    open: bool,
}

impl MovieDialog {
    pub fn add() -> Self {
        Self {
            mode: DialogMode::Add,
            open: true,
        }
    }

    pub fn edit(movie: Movie) -> Self {
        Self {
            mode: DialogMode::Edit(movie),
            open: true,
        }
    }

    pub fn mode(&self) -> &DialogMode {
        &self.mode
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            DialogMode::Add => "Add Movie",
            DialogMode::Edit(_) => "Movie Details",
        }
    }

    /// Form contents to show when the dialog opens
    pub fn initial_form(&self) -> MovieForm {
        match &self.mode {
            DialogMode::Add => MovieForm::default(),
            DialogMode::Edit(movie) => MovieForm::from_movie(movie),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Validate the form and save it through the provider
    ///
    /// Closes the dialog and returns the saved movie on success.
    pub async fn submit(
        &mut self,
        provider: &MovieProvider,
        form: &MovieForm,
    ) -> Result<Movie, DialogError> {
        let input = form.validate()?;

        let saved = match &self.mode {
            DialogMode::Add => {
                if provider.movie_exists(&input.title).await {
                    return Err(AppError::DuplicateTitle.into());
                }

                let mut movie = Movie::new(input.title, input.genre, input.year);
                provider
                    .add_movie(&mut movie)
                    .await
                    .map_err(log_failed_submit)?;
                movie
            }
            DialogMode::Edit(original) => {
                let mut movie = original.clone();
                provider
                    .update_movie(&mut movie, &input.title, &input.genre, input.year)
                    .await
                    .map_err(log_failed_submit)?;
                movie
            }
        };

        self.mode = DialogMode::Edit(saved.clone());
        self.open = false;
        Ok(saved)
    }
}

fn log_failed_submit(error: AppError) -> DialogError {
    log::debug!("Dialog submit failed: {}", error);
    error.into()
}

/// Confirmation step before a movie is removed
#[derive(Debug)]
pub struct DeleteDialog {
    movie: Movie,
}

impl DeleteDialog {
    pub fn new(movie: Movie) -> Self {
        Self { movie }
    }

    pub fn prompt(&self) -> String {
        format!("Delete \"{}\"?", self.movie.title)
    }

    pub async fn confirm(self, provider: &MovieProvider) -> AppResult<Movie> {
        provider.delete_movie(&self.movie).await?;
        Ok(self.movie)
    }
}
