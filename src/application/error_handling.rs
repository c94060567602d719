// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors to user-facing responses
// - Provides consistent error format for the UI
// - Never exposes storage internals
// - Logs backend errors for debugging

use serde::{Deserialize, Serialize};

use crate::application::dialogs::DialogError;
use crate::application::forms::FieldError;
use crate::error::AppError;

/// Standard error response for the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    NotFound,

    /// Bad input, either a form field or a record invariant
    Validation,

    /// Title already used by another movie
    Duplicate,

    Database,

    Internal,
}

impl ErrorResponse {
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::new(ErrorType::NotFound, "Movie not found", None),

            AppError::DuplicateTitle => Self::new(ErrorType::Duplicate, error.to_string(), None),

            AppError::InvalidMovie(ref domain) => Self::new(
                ErrorType::Validation,
                error.to_string(),
                Some(domain.to_string()),
            ),

            AppError::Database(ref e) => {
                log::error!("Database error: {}", e);
                Self::new(
                    ErrorType::Database,
                    "A database error occurred",
                    Some(e.to_string()),
                )
            }

            AppError::Pool(ref e) => {
                log::error!("Connection pool error: {}", e);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Backend(ref e) => {
                log::error!("Backend error: {}", e);
                Self::new(ErrorType::Database, "The catalog is unavailable", Some(e.clone()))
            }

            AppError::Serialization(ref e) => {
                log::error!("Serialization error: {}", e);
                Self::new(
                    ErrorType::Internal,
                    "Stored data could not be read",
                    Some(e.to_string()),
                )
            }

            AppError::Io(ref e) => {
                log::error!("IO error: {}", e);
                Self::new(ErrorType::Internal, "File system error", Some(e.to_string()))
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }

    pub fn from_field_error(error: FieldError) -> Self {
        Self::new(
            ErrorType::Validation,
            error.message,
            Some(error.field.to_string()),
        )
    }

    pub fn from_dialog_error(error: DialogError) -> Self {
        match error {
            DialogError::Field(field) => Self::from_field_error(field),
            DialogError::App(app) => Self::from_app_error(app),
        }
    }

    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    /// JSON string handed back to the caller
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }
}

/// Helper trait to convert Results into the command error format
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_app_error(e).to_json())
    }
}

impl<T> ToErrorResponse<T> for Result<T, DialogError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_dialog_error(e).to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forms::FormField;
    use crate::domain::DomainError;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Movie not found");
    }

    #[test]
    fn test_duplicate_error_keeps_user_message() {
        let error = ErrorResponse::from_app_error(AppError::DuplicateTitle);
        assert_eq!(error.error_type, ErrorType::Duplicate);
        assert_eq!(error.message, "A movie with this title already exists!");
    }

    #[test]
    fn test_invalid_movie_is_validation() {
        let error =
            ErrorResponse::from_app_error(AppError::InvalidMovie(DomainError::NonPositiveYear(0)));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert!(error.details.unwrap().contains("positive"));
    }

    #[test]
    fn test_backend_errors_are_database_category() {
        let error = ErrorResponse::from_app_error(AppError::Backend("offline".to_string()));
        assert_eq!(error.error_type, ErrorType::Database);
        assert_eq!(error.details.as_deref(), Some("offline"));
    }

    #[test]
    fn test_field_error_names_the_field() {
        let error = ErrorResponse::from_field_error(FieldError::new(
            FormField::Year,
            "Movie year must be numeric!",
        ));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.details.as_deref(), Some("year"));
    }

    #[test]
    fn test_dialog_errors_keep_their_category() {
        let error = ErrorResponse::from_dialog_error(DialogError::App(AppError::DuplicateTitle));
        assert_eq!(error.error_type, ErrorType::Duplicate);

        let error = ErrorResponse::from_dialog_error(DialogError::Field(FieldError::new(
            FormField::Genre,
            "Movie genre cannot be empty!",
        )));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.details.as_deref(), Some("genre"));
    }

    #[test]
    fn test_serialization() {
        let json = ErrorResponse::from_app_error(AppError::NotFound).to_json();
        assert!(json.contains("not_found"));
        assert!(json.contains("Movie not found"));
    }
}
