use std::fs;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use folio_core::vfs::PhysicalFileSystem;
use folio_core::Vault;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{create_router, GlobalState};

const HABITS_ROOT: &str = "# Atomic Habits\n\n\
Small habits compound. [[The Four Laws]] and [[Identity|who you are]] shape what sticks.\n\n\
> You do not rise to the level of your goals. You fall to the level of your systems.\n";

fn setup_vault() -> TempDir {
    let dir = TempDir::new().unwrap();
    let book = dir.path().join("Self Help").join("Atomic Habits");
    fs::create_dir_all(&book).unwrap();
    fs::write(book.join("Notes - Atomic Habits.md"), HABITS_ROOT).unwrap();
    fs::write(
        book.join("The Four Laws.md"),
        "# The Four Laws\n\nMake it obvious, attractive, easy and satisfying.",
    )
    .unwrap();
    fs::write(
        book.join("Identity.md"),
        "# Identity\n\nEvery action is a vote for the type of person you wish to become.",
    )
    .unwrap();
    dir
}

fn router(dir: &TempDir) -> Router {
    let vault = Vault::new(dir.path().to_path_buf(), Arc::new(PhysicalFileSystem));
    create_router(
        GlobalState::new(vault),
        &["http://localhost:3000".to_string()],
    )
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[tokio::test]
async fn test_health_and_root() {
    let dir = setup_vault();

    let (status, body) = get(router(&dir), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));

    let (status, body) = get(router(&dir), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_structure_nests_category_book_tree() {
    let dir = setup_vault();
    let (status, body) = get(router(&dir), "/api/notes/structure").await;

    assert_eq!(status, StatusCode::OK);
    let book = &body["Self Help"]["books"]["Atomic Habits"];
    assert_eq!(book["trees"][0]["title"], "Atomic Habits");
    assert_eq!(book["trees"][0]["children"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_note_by_id_and_not_found() {
    let dir = setup_vault();
    let app = router(&dir);

    let (_, results) = get(app.clone(), "/api/notes/search?q=identity").await;
    let id = results[0]["id"].as_str().unwrap().to_string();

    let (status, note) = get(app.clone(), &format!("/api/notes/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(note["title"], "Identity");
    assert_eq!(note["book"], "Atomic Habits");

    let (status, body) = get(app, "/api/notes/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("does-not-exist"));
}

#[tokio::test]
async fn test_search_rejects_short_query_and_bad_limit() {
    let dir = setup_vault();

    let (status, _) = get(router(&dir), "/api/notes/search?q=a").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = get(router(&dir), "/api/notes/search?q=habits&limit=51").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = get(router(&dir), "/api/notes/search?q=habits&limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_book_tree_route() {
    let dir = setup_vault();

    let (status, body) = get(router(&dir), "/api/notes/tree/Atomic%20Habits").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_tree"], true);
    assert_eq!(body["tree"]["title"], "Atomic Habits");

    let (status, _) = get(router(&dir), "/api/notes/tree/Missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_routes() {
    let dir = setup_vault();

    let (_, categories) = get(router(&dir), "/api/notes/categories").await;
    assert_eq!(categories, json!(["Self Help"]));

    let (_, books) = get(router(&dir), "/api/notes/books?category=Self%20Help").await;
    assert_eq!(books, json!(["Atomic Habits"]));

    let (status, notes) = get(router(&dir), "/api/notes?book=Atomic%20Habits&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notes.as_array().unwrap().len(), 2);

    let (_, stats) = get(router(&dir), "/api/notes/stats").await;
    assert_eq!(stats["total_notes"], 3);
}

#[tokio::test]
async fn test_cache_invalidate_reports_cleared_entries() {
    let dir = setup_vault();
    let app = router(&dir);

    get(app.clone(), "/api/notes/structure").await;
    let (status, body) = post_json(app, "/api/notes/cache/invalidate", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cache invalidated, 2 entries cleared");
}

#[tokio::test]
async fn test_quotes_routes() {
    let dir = setup_vault();

    let (status, quote) = get(router(&dir), "/api/quotes/random").await;
    assert_eq!(status, StatusCode::OK);
    assert!(quote["text"].as_str().unwrap().starts_with("You do not rise"));

    let (_, categories) = get(router(&dir), "/api/quotes/categories").await;
    assert_eq!(categories, json!(["Self Help"]));

    let (status, _) = get(router(&dir), "/api/quotes/random?category=Fiction").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contact_submit_and_list() {
    let dir = setup_vault();
    let app = router(&dir);

    let (status, receipt) = post_json(
        app.clone(),
        "/api/contact",
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Habit notes",
            "message": "Loved the notes on habit stacking."
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["success"], true);

    let (status, _) = post_json(
        app.clone(),
        "/api/contact",
        json!({"name": "A", "email": "nope", "subject": "Hi", "message": "short"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, listing) = get(app, "/api/contact/messages").await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["messages"][0]["email"], "ada@example.com");
}
