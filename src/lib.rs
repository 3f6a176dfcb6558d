//! Bookshelf Server
//!
//! A Rust REST API server managing an in-memory collection of book records,
//! exposing create, filtered list, fetch, update and delete operations with
//! uniform success/fail response envelopes.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
