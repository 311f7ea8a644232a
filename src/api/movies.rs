//! Movie endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::MessageResponse;
use crate::{
    error::AppResult,
    models::movie::{CreateMovie, MovieDetails, UpdateMovie},
};

/// List all movies ordered by title
#[utoipa::path(
    get,
    path = "/movies",
    tag = "movies",
    responses(
        (status = 200, description = "Movies with genre and language", body = Vec<MovieDetails>)
    )
)]
pub async fn list_movies(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<MovieDetails>>> {
    let movies = state.services.movies.list().await?;
    Ok(Json(movies))
}

/// Register a movie
#[utoipa::path(
    post,
    path = "/movies",
    tag = "movies",
    request_body = CreateMovie,
    responses(
        (status = 201, description = "Movie registered", body = MessageResponse),
        (status = 400, description = "Invalid field", body = crate::error::ErrorResponse),
        (status = 409, description = "Title already registered", body = crate::error::ErrorResponse),
        (status = 500, description = "Error registering movie", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_movie(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.movies.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("movie registered successfully")),
    ))
}

/// Update the given fields of a movie
#[utoipa::path(
    put,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie ID")),
    request_body = UpdateMovie,
    responses(
        (status = 200, description = "Movie updated", body = MessageResponse),
        (status = 404, description = "Movie not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Title already registered", body = crate::error::ErrorResponse),
        (status = 500, description = "Error updating movie", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_movie(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMovie>,
) -> AppResult<Json<MessageResponse>> {
    state.services.movies.update(id, &data).await?;
    Ok(Json(MessageResponse::new("movie updated successfully")))
}

/// Delete a movie
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie deleted", body = MessageResponse),
        (status = 404, description = "Movie not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Error deleting movie", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_movie(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.movies.delete(id).await?;
    Ok(Json(MessageResponse::new("movie deleted successfully")))
}

/// List movies of a genre
#[utoipa::path(
    get,
    path = "/movies/{genre_name}",
    tag = "movies",
    params(("genre_name" = String, Path, description = "Genre name, matched ignoring case")),
    responses(
        (status = 200, description = "Movies of the genre", body = Vec<MovieDetails>),
        (status = 404, description = "No movie with this genre", body = crate::error::ErrorResponse),
        (status = 500, description = "Error searching movies", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_movies_by_genre(
    State(state): State<crate::AppState>,
    Path(genre_name): Path<String>,
) -> AppResult<Json<Vec<MovieDetails>>> {
    let movies = state.services.movies.list_by_genre(&genre_name).await?;
    Ok(Json(movies))
}
