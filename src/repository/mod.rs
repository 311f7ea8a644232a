//! Repository layer for database operations

pub mod lookups;
pub mod memory;
pub mod movies;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Genre, Language, Movie, MovieDetails, MoviePatch, NewMovie},
};

/// Storage operations the catalog services depend on.
///
/// Implementations report a case-insensitive title collision as
/// [`AppError::Conflict`](crate::error::AppError::Conflict); any other
/// failure is returned as-is.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// All movies with genre and language, ordered by title
    async fn movies_list(&self) -> AppResult<Vec<MovieDetails>>;

    /// First movie whose title equals `title` ignoring case
    async fn movies_find_by_title(&self, title: &str) -> AppResult<Option<Movie>>;

    async fn movies_get_by_id(&self, id: i32) -> AppResult<Option<Movie>>;

    async fn movies_create(&self, data: &NewMovie) -> AppResult<Movie>;

    /// Write the present fields of `patch`, returning `None` if the movie is gone
    async fn movies_update(&self, id: i32, patch: &MoviePatch) -> AppResult<Option<Movie>>;

    /// Returns whether a row was removed
    async fn movies_delete(&self, id: i32) -> AppResult<bool>;

    /// Movies whose genre name equals `genre_name` ignoring case, ordered by title
    async fn movies_list_by_genre_name(&self, genre_name: &str) -> AppResult<Vec<MovieDetails>>;

    async fn genres_list(&self) -> AppResult<Vec<Genre>>;

    async fn languages_list(&self) -> AppResult<Vec<Language>>;
}

/// PostgreSQL backed store holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn movies_list(&self) -> AppResult<Vec<MovieDetails>> {
        Repository::movies_list(self).await
    }

    async fn movies_find_by_title(&self, title: &str) -> AppResult<Option<Movie>> {
        Repository::movies_find_by_title(self, title).await
    }

    async fn movies_get_by_id(&self, id: i32) -> AppResult<Option<Movie>> {
        Repository::movies_get_by_id(self, id).await
    }

    async fn movies_create(&self, data: &NewMovie) -> AppResult<Movie> {
        Repository::movies_create(self, data).await
    }

    async fn movies_update(&self, id: i32, patch: &MoviePatch) -> AppResult<Option<Movie>> {
        Repository::movies_update(self, id, patch).await
    }

    async fn movies_delete(&self, id: i32) -> AppResult<bool> {
        Repository::movies_delete(self, id).await
    }

    async fn movies_list_by_genre_name(&self, genre_name: &str) -> AppResult<Vec<MovieDetails>> {
        Repository::movies_list_by_genre_name(self, genre_name).await
    }

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        Repository::genres_list(self).await
    }

    async fn languages_list(&self) -> AppResult<Vec<Language>> {
        Repository::languages_list(self).await
    }
}
