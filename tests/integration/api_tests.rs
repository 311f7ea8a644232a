//! Router tests against the in-memory catalog store

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use movie_catalog_server::{api, repository::memory::MemoryStore, AppState};

fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::seeded());
    let state = AppState::new(store.clone());
    (api::create_router(state), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

fn movie(title: &str, genre_id: i32, release_date: &str) -> Value {
    json!({
        "title": title,
        "genre_id": genre_id,
        "language_id": 1,
        "oscar_count": 0,
        "release_date": release_date
    })
}

async fn create(app: &Router, title: &str, genre_id: i32) -> StatusCode {
    let (status, _) = send(
        app,
        Method::POST,
        "/movies",
        Some(movie(title, genre_id, "2021-10-22")),
    )
    .await;
    status
}

async fn id_of(app: &Router, title: &str) -> i64 {
    let (_, body) = send(app, Method::GET, "/movies", None).await;
    body.as_array()
        .unwrap()
        .iter()
        .find(|m| m["title"] == title)
        .and_then(|m| m["id"].as_i64())
        .expect("movie should be listed")
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_create_same_title_twice() {
    let (app, store) = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/movies",
        Some(movie("Dune", 1, "2021-10-22")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "movie registered successfully");

    let (status, body) = send(
        &app,
        Method::POST,
        "/movies",
        Some(movie("Dune", 1, "2021-10-22")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "movie already registered");
    assert_eq!(store.movie_count().await, 1);
}

#[tokio::test]
async fn test_duplicate_title_ignores_case() {
    let (app, store) = test_app();
    assert_eq!(create(&app, "Dune", 4).await, StatusCode::CREATED);
    assert_eq!(create(&app, "dUNE", 4).await, StatusCode::CONFLICT);
    assert_eq!(store.movie_count().await, 1);
}

#[tokio::test]
async fn test_created_movie_keeps_release_date() {
    let (app, store) = test_app();
    assert_eq!(create(&app, "Dune", 4).await, StatusCode::CREATED);
    assert_eq!(store.movie_count().await, 1);

    let (_, body) = send(&app, Method::GET, "/movies", None).await;
    assert_eq!(body[0]["release_date"], "2021-10-22T00:00:00Z");
    assert_eq!(body[0]["genre"]["name"], "Science Fiction");
    assert_eq!(body[0]["language"]["name"], "English");
}

#[tokio::test]
async fn test_create_with_invalid_release_date() {
    let (app, store) = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/movies",
        Some(movie("Dune", 4, "someday")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert_eq!(store.movie_count().await, 0);
}

#[tokio::test]
async fn test_create_with_unknown_genre_is_store_error() {
    let (app, store) = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/movies",
        Some(movie("Dune", 404, "2021-10-22")),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "error registering movie");
    assert_eq!(store.movie_count().await, 0);
}

#[tokio::test]
async fn test_list_is_sorted_by_title() {
    let (app, _) = test_app();
    for title in ["Parasite", "Amelie", "heat", "Casablanca", "alien"] {
        assert_eq!(create(&app, title, 3).await, StatusCode::CREATED);
    }

    let (status, body) = send(&app, Method::GET, "/movies", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["alien", "Amelie", "Casablanca", "heat", "Parasite"]);
}

#[tokio::test]
async fn test_update_missing_movie() {
    let (app, store) = test_app();
    assert_eq!(create(&app, "Dune", 4).await, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/movies/999",
        Some(json!({ "oscar_count": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "movie not found");

    let (_, body) = send(&app, Method::GET, "/movies", None).await;
    assert_eq!(body[0]["oscar_count"], 0);
    assert_eq!(store.movie_count().await, 1);
}

#[tokio::test]
async fn test_update_without_release_date_keeps_it() {
    let (app, _) = test_app();
    assert_eq!(create(&app, "Dune", 4).await, StatusCode::CREATED);
    let id = id_of(&app, "Dune").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/movies/{}", id),
        Some(json!({ "oscar_count": 6, "title": "Dune: Part One" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "movie updated successfully");

    let (_, body) = send(&app, Method::GET, "/movies", None).await;
    assert_eq!(body[0]["title"], "Dune: Part One");
    assert_eq!(body[0]["oscar_count"], 6);
    assert_eq!(body[0]["release_date"], "2021-10-22T00:00:00Z");
}

#[tokio::test]
async fn test_update_release_date() {
    let (app, _) = test_app();
    assert_eq!(create(&app, "Dune", 4).await, StatusCode::CREATED);
    let id = id_of(&app, "Dune").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/movies/{}", id),
        Some(json!({ "release_date": "2021-09-03T18:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/movies", None).await;
    assert_eq!(body[0]["release_date"], "2021-09-03T18:00:00Z");
}

#[tokio::test]
async fn test_update_with_blank_release_date_keeps_it() {
    let (app, _) = test_app();
    assert_eq!(create(&app, "Dune", 4).await, StatusCode::CREATED);
    let id = id_of(&app, "Dune").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/movies/{}", id),
        Some(json!({ "release_date": "", "oscar_count": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/movies", None).await;
    assert_eq!(body[0]["oscar_count"], 6);
    assert_eq!(body[0]["release_date"], "2021-10-22T00:00:00Z");
}

#[tokio::test]
async fn test_update_to_taken_title_conflicts() {
    let (app, _) = test_app();
    assert_eq!(create(&app, "Dune", 4).await, StatusCode::CREATED);
    assert_eq!(create(&app, "Arrival", 4).await, StatusCode::CREATED);
    let id = id_of(&app, "Arrival").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/movies/{}", id),
        Some(json!({ "title": "DUNE" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_movie() {
    let (app, store) = test_app();
    assert_eq!(create(&app, "Dune", 4).await, StatusCode::CREATED);
    let id = id_of(&app, "Dune").await;

    let (status, body) = send(&app, Method::DELETE, &format!("/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "movie deleted successfully");
    assert_eq!(store.movie_count().await, 0);

    let (status, body) = send(&app, Method::DELETE, &format!("/movies/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "movie not found");
}

#[tokio::test]
async fn test_delete_with_non_numeric_id() {
    let (app, _) = test_app();
    let (status, _) = send(&app, Method::DELETE, "/movies/dune", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_by_genre() {
    let (app, _) = test_app();
    assert_eq!(create(&app, "Solaris", 4).await, StatusCode::CREATED);
    assert_eq!(create(&app, "Heat", 1).await, StatusCode::CREATED);
    assert_eq!(create(&app, "Arrival", 4).await, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/movies/science%20fiction", None).await;
    assert_eq!(status, StatusCode::OK);

    let movies = body.as_array().unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0]["title"], "Arrival");
    assert_eq!(movies[1]["title"], "Solaris");
    for m in movies {
        assert_eq!(m["genre"]["name"], "Science Fiction");
        assert_eq!(m["language"]["name"], "English");
    }
}

#[tokio::test]
async fn test_list_by_genre_without_matches() {
    let (app, _) = test_app();
    assert_eq!(create(&app, "Heat", 1).await, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/movies/horror", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "no movie found with this genre");
}

#[tokio::test]
async fn test_lookups() {
    let (app, _) = test_app();

    let (status, body) = send(&app, Method::GET, "/genres", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 7);
    assert_eq!(body[0]["name"], "Action");

    let (status, body) = send(&app, Method::GET, "/languages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "English");
}

#[tokio::test]
async fn test_openapi_document() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/movies"].is_object());
}
