//! Movie model and request types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::ToSchema;
use validator::Validate;

use super::lookup::{Genre, Language};
use crate::error::{AppError, AppResult};

/// Movie record as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub genre_id: i32,
    pub language_id: i32,
    pub oscar_count: i32,
    pub release_date: DateTime<Utc>,
}

/// Movie with its genre and language expanded inline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MovieDetails {
    pub id: i32,
    pub title: String,
    pub genre_id: i32,
    pub language_id: i32,
    pub oscar_count: i32,
    pub release_date: DateTime<Utc>,
    pub genre: Genre,
    pub language: Language,
}

impl MovieDetails {
    pub fn new(movie: Movie, genre: Genre, language: Language) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            genre_id: movie.genre_id,
            language_id: movie.language_id,
            oscar_count: movie.oscar_count,
            release_date: movie.release_date,
            genre,
            language,
        }
    }
}

// Rows come from `movies JOIN genres JOIN languages` with the lookup names
// aliased to genre_name / language_name.
impl<'r> FromRow<'r, PgRow> for MovieDetails {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let genre_id: i32 = row.try_get("genre_id")?;
        let language_id: i32 = row.try_get("language_id")?;
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            genre_id,
            language_id,
            oscar_count: row.try_get("oscar_count")?,
            release_date: row.try_get("release_date")?,
            genre: Genre {
                id: genre_id,
                name: row.try_get("genre_name")?,
            },
            language: Language {
                id: language_id,
                name: row.try_get("language_name")?,
            },
        })
    }
}

/// Create movie request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMovie {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub genre_id: i32,
    pub language_id: i32,
    pub oscar_count: i32,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub release_date: String,
}

/// Update movie request. Only the fields present are written.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMovie {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    pub genre_id: Option<i32>,
    pub language_id: Option<i32>,
    pub oscar_count: Option<i32>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub release_date: Option<String>,
}

/// Validated movie ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub genre_id: i32,
    pub language_id: i32,
    pub oscar_count: i32,
    pub release_date: DateTime<Utc>,
}

impl TryFrom<&CreateMovie> for NewMovie {
    type Error = AppError;

    fn try_from(data: &CreateMovie) -> AppResult<Self> {
        Ok(Self {
            title: data.title.clone(),
            genre_id: data.genre_id,
            language_id: data.language_id,
            oscar_count: data.oscar_count,
            release_date: parse_release_date(&data.release_date)?,
        })
    }
}

/// Validated partial update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub genre_id: Option<i32>,
    pub language_id: Option<i32>,
    pub oscar_count: Option<i32>,
    pub release_date: Option<DateTime<Utc>>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.genre_id.is_none()
            && self.language_id.is_none()
            && self.oscar_count.is_none()
            && self.release_date.is_none()
    }

    /// Apply the present fields onto an existing record
    pub fn apply(&self, movie: &mut Movie) {
        if let Some(ref title) = self.title {
            movie.title = title.clone();
        }
        if let Some(genre_id) = self.genre_id {
            movie.genre_id = genre_id;
        }
        if let Some(language_id) = self.language_id {
            movie.language_id = language_id;
        }
        if let Some(oscar_count) = self.oscar_count {
            movie.oscar_count = oscar_count;
        }
        if let Some(release_date) = self.release_date {
            movie.release_date = release_date;
        }
    }
}

impl TryFrom<&UpdateMovie> for MoviePatch {
    type Error = AppError;

    fn try_from(data: &UpdateMovie) -> AppResult<Self> {
        // A blank date counts as absent and keeps the stored one
        let release_date = data
            .release_date
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(parse_release_date)
            .transpose()?;

        Ok(Self {
            title: data.title.clone(),
            genre_id: data.genre_id,
            language_id: data.language_id,
            oscar_count: data.oscar_count,
            release_date,
        })
    }
}

/// Parse a release date given either as a calendar date (midnight UTC) or as
/// an RFC 3339 timestamp.
pub fn parse_release_date(value: &str) -> AppResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::Validation(format!("invalid release_date: {:?}", value)))
}
