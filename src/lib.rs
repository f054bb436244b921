//! Biblioteca Online
//!
//! A small REST JSON API over an in-memory catalog of books: list, lookup by
//! id, accent-insensitive category search, create, update and delete.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
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

impl AppState {
    /// Build the state for `config`, with a freshly seeded catalog
    pub fn new(config: AppConfig) -> Self {
        let repository = repository::Repository::new(&config.catalog);
        Self {
            services: Arc::new(services::Services::new(repository)),
            config: Arc::new(config),
        }
    }
}
