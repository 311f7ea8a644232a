//! Movies service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{CreateMovie, Movie, MovieDetails, MoviePatch, NewMovie, UpdateMovie},
    repository::CatalogStore,
};

pub const MOVIE_ALREADY_REGISTERED: &str = "movie already registered";
pub const MOVIE_NOT_FOUND: &str = "movie not found";
pub const NO_MOVIE_WITH_GENRE: &str = "no movie found with this genre";

const CREATE_FAILED: &str = "error registering movie";
const UPDATE_FAILED: &str = "error updating movie";
const DELETE_FAILED: &str = "error deleting movie";
const SEARCH_FAILED: &str = "error searching movies";

/// Map a store failure to the fixed message of the operation. Title
/// conflicts keep their meaning; every other cause is logged and dropped.
fn store_failure(message: &'static str) -> impl Fn(AppError) -> AppError {
    move |err| match err {
        AppError::Conflict(_) => AppError::Conflict(MOVIE_ALREADY_REGISTERED.to_string()),
        other => {
            tracing::error!(error = %other, "{}", message);
            AppError::Storage(message.to_string())
        }
    }
}

#[derive(Clone)]
pub struct MoviesService {
    store: Arc<dyn CatalogStore>,
}

impl MoviesService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// List all movies ordered by title
    pub async fn list(&self) -> AppResult<Vec<MovieDetails>> {
        self.store.movies_list().await
    }

    /// Register a new movie, refusing titles already in the catalog
    pub async fn create(&self, data: &CreateMovie) -> AppResult<Movie> {
        data.validate()?;

        let existing = self
            .store
            .movies_find_by_title(&data.title)
            .await
            .map_err(store_failure(CREATE_FAILED))?;
        if existing.is_some() {
            return Err(AppError::Conflict(MOVIE_ALREADY_REGISTERED.to_string()));
        }

        let new_movie = NewMovie::try_from(data)?;
        let movie = self
            .store
            .movies_create(&new_movie)
            .await
            .map_err(store_failure(CREATE_FAILED))?;

        tracing::info!(id = movie.id, title = %movie.title, "movie registered");
        Ok(movie)
    }

    /// Write the fields present in `data` onto an existing movie
    pub async fn update(&self, id: i32, data: &UpdateMovie) -> AppResult<Movie> {
        data.validate()?;

        self.store
            .movies_get_by_id(id)
            .await
            .map_err(store_failure(UPDATE_FAILED))?
            .ok_or_else(|| AppError::NotFound(MOVIE_NOT_FOUND.to_string()))?;

        let patch = MoviePatch::try_from(data)?;
        let movie = self
            .store
            .movies_update(id, &patch)
            .await
            .map_err(store_failure(UPDATE_FAILED))?
            .ok_or_else(|| AppError::NotFound(MOVIE_NOT_FOUND.to_string()))?;

        tracing::info!(id, "movie updated");
        Ok(movie)
    }

    /// Permanently remove a movie
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let delete_failed = store_failure(DELETE_FAILED);

        self.store
            .movies_get_by_id(id)
            .await
            .map_err(&delete_failed)?
            .ok_or_else(|| AppError::NotFound(MOVIE_NOT_FOUND.to_string()))?;

        let removed = self.store.movies_delete(id).await.map_err(&delete_failed)?;
        if !removed {
            return Err(AppError::NotFound(MOVIE_NOT_FOUND.to_string()));
        }

        tracing::info!(id, "movie deleted");
        Ok(())
    }

    /// Movies whose genre name matches ignoring case; an empty result is a 404
    pub async fn list_by_genre(&self, genre_name: &str) -> AppResult<Vec<MovieDetails>> {
        let movies = self
            .store
            .movies_list_by_genre_name(genre_name)
            .await
            .map_err(store_failure(SEARCH_FAILED))?;

        if movies.is_empty() {
            return Err(AppError::NotFound(NO_MOVIE_WITH_GENRE.to_string()));
        }
        Ok(movies)
    }
}
