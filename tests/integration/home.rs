use axum::http::StatusCode;
use local_library_server::{models::CopyStatus, repository::BookInstanceStore};

use crate::common::TestApp;

#[tokio::test]
async fn test_index_counts() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    app.genre("Romance").await;
    let emma = app.book("Emma", &austen, &[]).await;
    app.copy(&emma, "London, Penguin, 2003").await;
    let loaned = app.copy(&emma, "New York, Vintage, 2012").await;
    assert_eq!(app.store.book_instances_count(Some(CopyStatus::Available)).await.unwrap(), 2);
    let body = format!("book={}&imprint=Vintage&status=Loaned", emma.id);
    app.post_form(&format!("/catalog/bookinstance/{}/update", loaned.id), &body)
        .await
        .assert_redirect(&format!("/catalog/bookinstance/{}", loaned.id));

    let response = app.get("/catalog").await;

    response.assert_view("index");
    let data = response.data();
    assert_eq!(data["title"], "Local Library Home");
    assert_eq!(data["book_count"], 1);
    assert_eq!(data["book_instance_count"], 2);
    assert_eq!(data["book_instance_available_count"], 1);
    assert_eq!(data["author_count"], 1);
    assert_eq!(data["genre_count"], 1);
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = TestApp::new();

    let response = app.get("/").await;
    response.assert_redirect("/catalog");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let health = app.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "healthy");
    assert_eq!(health.body["store"], "memory");

    let ready = app.get("/ready").await;
    assert_eq!(ready.body["status"], "ready");
}
