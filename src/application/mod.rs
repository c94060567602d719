// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Sits ABOVE the provider, below the CLI
// - Forms and dialogs own the input flow
// - Commands translate between DTOs and domain entities

pub mod commands;
pub mod dialogs;
pub mod dto;
pub mod error_handling;
pub mod forms;
pub mod state;

pub use commands::*;
pub use dialogs::{DeleteDialog, DialogError, DialogMode, MovieDialog};
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use forms::{FieldError, FormField, MovieForm, MovieInput};
pub use state::AppState;
