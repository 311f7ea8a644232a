//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, lookups, movies};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movie Catalog API",
        version = "1.0.0",
        description = "Movies, genres and languages REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Movies
        movies::list_movies,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
        movies::list_movies_by_genre,
        // Lookups
        lookups::list_genres,
        lookups::list_languages,
    ),
    components(
        schemas(
            crate::models::movie::Movie,
            crate::models::movie::MovieDetails,
            crate::models::movie::CreateMovie,
            crate::models::movie::UpdateMovie,
            crate::models::lookup::Genre,
            crate::models::lookup::Language,
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "movies", description = "Movie catalog"),
        (name = "lookups", description = "Genres and languages")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
