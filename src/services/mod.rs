// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod movie_listener;
pub mod movie_provider;


pub use movie_listener::MovieListener;
pub use movie_provider::{DataStatus, MovieProvider};
