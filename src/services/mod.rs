//! Business logic services

pub mod lookups;
pub mod movies;

use std::sync::Arc;

use crate::{error::AppResult, repository::CatalogStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub movies: movies::MoviesService,
    pub lookups: lookups::LookupsService,
    store: Arc<dyn CatalogStore>,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            movies: movies::MoviesService::new(store.clone()),
            lookups: lookups::LookupsService::new(store.clone()),
            store,
        }
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
