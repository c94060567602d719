// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept DTOs, return DTOs
// - Errors leave as JSON ErrorResponse strings
// - Commands NEVER contain business logic

pub mod movie_commands;

pub use movie_commands::*;
