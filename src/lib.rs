//! Movie Catalog Server
//!
//! A REST JSON API over a catalog of movies, with genre and language
//! lookups, backed by PostgreSQL.

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
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state around any catalog store
    pub fn new(store: Arc<dyn repository::CatalogStore>) -> Self {
        Self {
            services: Arc::new(services::Services::new(store)),
        }
    }
}
