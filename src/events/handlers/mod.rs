// src/events/handlers/mod.rs
//
// Event Handlers
//
// Handlers use closure-based subscription via EventBus::subscribe.

pub mod audit_handler;

pub use audit_handler::register_audit_handlers;
