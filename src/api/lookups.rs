//! Genre and language lookup endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{Genre, Language},
};

/// List genres
#[utoipa::path(
    get,
    path = "/genres",
    tag = "lookups",
    responses(
        (status = 200, description = "All genres ordered by name", body = Vec<Genre>)
    )
)]
pub async fn list_genres(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.services.lookups.genres().await?;
    Ok(Json(genres))
}

/// List languages
#[utoipa::path(
    get,
    path = "/languages",
    tag = "lookups",
    responses(
        (status = 200, description = "All languages ordered by name", body = Vec<Language>)
    )
)]
pub async fn list_languages(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Language>>> {
    let languages = state.services.lookups.languages().await?;
    Ok(Json(languages))
}
