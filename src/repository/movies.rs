//! Movie domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieDetails, MoviePatch, NewMovie},
};

const DETAILS_SELECT: &str = r#"
    SELECT m.id, m.title, m.genre_id, m.language_id, m.oscar_count, m.release_date,
           g.name AS genre_name, l.name AS language_name
    FROM movies m
    JOIN genres g ON g.id = m.genre_id
    JOIN languages l ON l.id = m.language_id
"#;

/// Turn a unique violation on the title index into a conflict
fn title_conflict(err: sqlx::Error) -> AppError {
    let err = AppError::from(err);
    if err.is_unique_violation() {
        AppError::Conflict("movie already registered".to_string())
    } else {
        err
    }
}

impl Repository {
    /// List all movies ordered by title
    pub async fn movies_list(&self) -> AppResult<Vec<MovieDetails>> {
        let query = format!("{} ORDER BY m.title ASC", DETAILS_SELECT);
        let rows = sqlx::query_as::<_, MovieDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Find a movie by title, ignoring case
    pub async fn movies_find_by_title(&self, title: &str) -> AppResult<Option<Movie>> {
        let row = sqlx::query_as::<_, Movie>(
            "SELECT * FROM movies WHERE LOWER(title) = LOWER($1) LIMIT 1",
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Get movie by ID
    pub async fn movies_get_by_id(&self, id: i32) -> AppResult<Option<Movie>> {
        let row = sqlx::query_as::<_, Movie>("SELECT * FROM movies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Create movie
    pub async fn movies_create(&self, data: &NewMovie) -> AppResult<Movie> {
        sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (title, genre_id, language_id, oscar_count, release_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(data.genre_id)
        .bind(data.language_id)
        .bind(data.oscar_count)
        .bind(data.release_date)
        .fetch_one(&self.pool)
        .await
        .map_err(title_conflict)
    }

    /// Update the fields present in `patch`
    pub async fn movies_update(&self, id: i32, patch: &MoviePatch) -> AppResult<Option<Movie>> {
        if patch.is_empty() {
            return self.movies_get_by_id(id).await;
        }

        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(patch.title, "title");
        add_field!(patch.genre_id, "genre_id");
        add_field!(patch.language_id, "language_id");
        add_field!(patch.oscar_count, "oscar_count");
        add_field!(patch.release_date, "release_date");

        let query = format!(
            "UPDATE movies SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Movie>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(patch.title);
        bind_field!(patch.genre_id);
        bind_field!(patch.language_id);
        bind_field!(patch.oscar_count);
        bind_field!(patch.release_date);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(title_conflict)
    }

    /// Delete movie
    pub async fn movies_delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List movies of a genre, matching the genre name ignoring case
    pub async fn movies_list_by_genre_name(&self, genre_name: &str) -> AppResult<Vec<MovieDetails>> {
        let query = format!(
            "{} WHERE LOWER(g.name) = LOWER($1) ORDER BY m.title ASC",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, MovieDetails>(&query)
            .bind(genre_name)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
