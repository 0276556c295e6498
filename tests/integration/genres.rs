use axum::http::StatusCode;
use local_library_server::repository::GenreStore;

use crate::common::TestApp;

#[tokio::test]
async fn test_create_genre() {
    let app = TestApp::new();

    let response = app.post_form("/catalog/genre/create", "name=Fantasy").await;

    let genres = app.store.genres_list().await.unwrap();
    assert_eq!(genres.len(), 1);
    response.assert_redirect(&format!("/catalog/genre/{}", genres[0].id));
}

#[tokio::test]
async fn test_create_existing_genre_redirects_to_it() {
    let app = TestApp::new();
    let fantasy = app.genre("Fantasy").await;

    let response = app.post_form("/catalog/genre/create", "name=FANTASY").await;

    response.assert_redirect(&format!("/catalog/genre/{}", fantasy.id));
    assert_eq!(app.store.genres_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_short_genre_name_is_rejected() {
    let app = TestApp::new();

    let response = app.post_form("/catalog/genre/create", "name=Sf").await;

    response.assert_view("genre_form");
    assert_eq!(
        response.data()["errors"][0]["message"],
        "Genre name must contain at least 3 characters"
    );
    assert_eq!(response.data()["genre"]["name"], "Sf");
    assert_eq!(app.store.genres_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_genre_list_and_detail() {
    let app = TestApp::new();
    let poetry = app.genre("Poetry").await;
    app.genre("Fantasy").await;
    let austen = app.author("Jane", "Austen").await;
    app.book("Sonnets", &austen, &[&poetry]).await;

    let list = app.get("/catalog/genres").await;
    list.assert_view("genre_list");
    assert_eq!(list.data()["genre_list"][0]["name"], "Fantasy");

    let detail = app.get(&format!("/catalog/genre/{}", poetry.id)).await;
    detail.assert_view("genre_detail");
    assert_eq!(detail.data()["genre"]["name"], "Poetry");
    assert_eq!(detail.data()["genre_books"][0]["title"], "Sonnets");

    assert_eq!(app.get("/catalog/genre/999").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_genre_in_use_is_refused() {
    let app = TestApp::new();
    let poetry = app.genre("Poetry").await;
    let austen = app.author("Jane", "Austen").await;
    app.book("Sonnets", &austen, &[&poetry]).await;

    let response = app
        .post_form(&format!("/catalog/genre/{}/delete", poetry.id), &format!("genreid={}", poetry.id))
        .await;

    response.assert_view("genre_delete");
    assert_eq!(response.data()["genre_books"][0]["title"], "Sonnets");
    assert!(app.store.genres_get_by_id(poetry.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_unused_genre() {
    let app = TestApp::new();
    let poetry = app.genre("Poetry").await;

    let response = app
        .post_form(&format!("/catalog/genre/{}/delete", poetry.id), &format!("genreid={}", poetry.id))
        .await;

    response.assert_redirect("/catalog/genres");
    assert_eq!(app.store.genres_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_rename_genre() {
    let app = TestApp::new();
    let genre = app.genre("Poetry").await;

    let response = app
        .post_form(&format!("/catalog/genre/{}/update", genre.id), "name=Verse")
        .await;

    response.assert_redirect(&format!("/catalog/genre/{}", genre.id));
    let stored = app.store.genres_get_by_id(genre.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Verse");
}
