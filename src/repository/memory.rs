//! In-process store used in place of PostgreSQL by tests and local demos.
//!
//! Mirrors the database schema rules: ids are assigned sequentially, titles
//! are unique ignoring case and movies must reference an existing genre and
//! language. Listings sort titles ignoring case, like the database collation.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CatalogStore;
use crate::{
    error::{AppError, AppResult},
    models::{Genre, Language, Movie, MovieDetails, MoviePatch, NewMovie},
};

/// Order names the way PostgreSQL's default linguistic collations do for
/// plain titles: letters compare ignoring case, ties fall back to bytes.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Default)]
struct Tables {
    genres: Vec<Genre>,
    languages: Vec<Language>,
    movies: BTreeMap<i32, Movie>,
    next_movie_id: i32,
}

impl Tables {
    fn details(&self, movie: &Movie) -> Option<MovieDetails> {
        let genre = self.genres.iter().find(|g| g.id == movie.genre_id)?;
        let language = self.languages.iter().find(|l| l.id == movie.language_id)?;
        Some(MovieDetails::new(movie.clone(), genre.clone(), language.clone()))
    }

    fn sorted_details<'a>(&self, movies: impl Iterator<Item = &'a Movie>) -> Vec<MovieDetails> {
        let mut rows: Vec<MovieDetails> = movies.filter_map(|m| self.details(m)).collect();
        rows.sort_by(|a, b| collate(&a.title, &b.title));
        rows
    }

    fn title_taken(&self, title: &str, except: Option<i32>) -> bool {
        let title = title.to_lowercase();
        self.movies
            .values()
            .any(|m| Some(m.id) != except && m.title.to_lowercase() == title)
    }

    fn check_references(&self, genre_id: i32, language_id: i32) -> AppResult<()> {
        if !self.genres.iter().any(|g| g.id == genre_id) {
            return Err(AppError::Internal(format!(
                "movies.genre_id references unknown genre {}",
                genre_id
            )));
        }
        if !self.languages.iter().any(|l| l.id == language_id) {
            return Err(AppError::Internal(format!(
                "movies.language_id references unknown language {}",
                language_id
            )));
        }
        Ok(())
    }
}

/// Catalog store kept entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store with the given lookup tables
    pub fn new(genres: Vec<Genre>, languages: Vec<Language>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                genres,
                languages,
                movies: BTreeMap::new(),
                next_movie_id: 1,
            }),
        }
    }

    /// Store seeded with the same genres and languages as the schema migration
    pub fn seeded() -> Self {
        let genres = [
            "Action",
            "Comedy",
            "Drama",
            "Science Fiction",
            "Horror",
            "Animation",
            "Documentary",
        ];
        let languages = ["English", "Portuguese", "Spanish", "French", "Japanese"];

        Self::new(
            genres
                .iter()
                .zip(1..)
                .map(|(name, id)| Genre { id, name: name.to_string() })
                .collect(),
            languages
                .iter()
                .zip(1..)
                .map(|(name, id)| Language { id, name: name.to_string() })
                .collect(),
        )
    }

    /// Number of stored movies
    pub async fn movie_count(&self) -> usize {
        self.tables.read().await.movies.len()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn movies_list(&self) -> AppResult<Vec<MovieDetails>> {
        let tables = self.tables.read().await;
        Ok(tables.sorted_details(tables.movies.values()))
    }

    async fn movies_find_by_title(&self, title: &str) -> AppResult<Option<Movie>> {
        let title = title.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .movies
            .values()
            .find(|m| m.title.to_lowercase() == title)
            .cloned())
    }

    async fn movies_get_by_id(&self, id: i32) -> AppResult<Option<Movie>> {
        Ok(self.tables.read().await.movies.get(&id).cloned())
    }

    async fn movies_create(&self, data: &NewMovie) -> AppResult<Movie> {
        let mut tables = self.tables.write().await;
        tables.check_references(data.genre_id, data.language_id)?;
        if tables.title_taken(&data.title, None) {
            return Err(AppError::Conflict("movie already registered".to_string()));
        }

        let id = tables.next_movie_id.max(1);
        tables.next_movie_id = id + 1;

        let movie = Movie {
            id,
            title: data.title.clone(),
            genre_id: data.genre_id,
            language_id: data.language_id,
            oscar_count: data.oscar_count,
            release_date: data.release_date,
        };
        tables.movies.insert(id, movie.clone());
        Ok(movie)
    }

    async fn movies_update(&self, id: i32, patch: &MoviePatch) -> AppResult<Option<Movie>> {
        let mut tables = self.tables.write().await;
        let Some(mut movie) = tables.movies.get(&id).cloned() else {
            return Ok(None);
        };

        patch.apply(&mut movie);
        tables.check_references(movie.genre_id, movie.language_id)?;
        if tables.title_taken(&movie.title, Some(id)) {
            return Err(AppError::Conflict("movie already registered".to_string()));
        }

        tables.movies.insert(id, movie.clone());
        Ok(Some(movie))
    }

    async fn movies_delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.write().await.movies.remove(&id).is_some())
    }

    async fn movies_list_by_genre_name(&self, genre_name: &str) -> AppResult<Vec<MovieDetails>> {
        let genre_name = genre_name.to_lowercase();
        let tables = self.tables.read().await;
        let genre_ids: Vec<i32> = tables
            .genres
            .iter()
            .filter(|g| g.name.to_lowercase() == genre_name)
            .map(|g| g.id)
            .collect();

        Ok(tables.sorted_details(
            tables
                .movies
                .values()
                .filter(|m| genre_ids.contains(&m.genre_id)),
        ))
    }

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let mut genres = self.tables.read().await.genres.clone();
        genres.sort_by(|a, b| collate(&a.name, &b.name));
        Ok(genres)
    }

    async fn languages_list(&self) -> AppResult<Vec<Language>> {
        let mut languages = self.tables.read().await.languages.clone();
        languages.sort_by(|a, b| collate(&a.name, &b.name));
        Ok(languages)
    }
}
