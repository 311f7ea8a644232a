//! Genre and language lookups service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Genre, Language},
    repository::CatalogStore,
};

#[derive(Clone)]
pub struct LookupsService {
    store: Arc<dyn CatalogStore>,
}

impl LookupsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn genres(&self) -> AppResult<Vec<Genre>> {
        self.store.genres_list().await
    }

    pub async fn languages(&self) -> AppResult<Vec<Language>> {
        self.store.languages_list().await
    }
}
