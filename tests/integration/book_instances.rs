use axum::http::StatusCode;
use local_library_server::{models::CopyStatus, repository::BookInstanceStore};

use crate::common::{date, TestApp};

#[tokio::test]
async fn test_create_copy_defaults_to_maintenance() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    let emma = app.book("Emma", &austen, &[]).await;

    let body = format!("book={}&imprint=London%2C+Penguin%2C+2003&status=&due_back=", emma.id);
    let response = app.post_form("/catalog/bookinstance/create", &body).await;

    let copies = app.store.book_instances_list().await.unwrap();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].imprint, "London, Penguin, 2003");
    assert_eq!(copies[0].status, CopyStatus::Maintenance);
    assert_eq!(copies[0].due_back, None);
    response.assert_redirect(&format!("/catalog/bookinstance/{}", copies[0].id));
}

#[tokio::test]
async fn test_create_copy_validation() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    let emma = app.book("Emma", &austen, &[]).await;

    let body = format!("book={}&imprint=&status=Lost&due_back=soon", emma.id);
    let response = app.post_form("/catalog/bookinstance/create", &body).await;

    response.assert_view("bookinstance_form");
    let messages: Vec<&str> = response.data()["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, ["Imprint must be specified", "Invalid status", "Invalid date"]);
    assert_eq!(response.data()["selected_book"], emma.id);
    assert_eq!(response.data()["book_list"][0]["title"], "Emma");
    assert_eq!(app.store.book_instances_count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_copy_of_unknown_book() {
    let app = TestApp::new();

    let response = app
        .post_form("/catalog/bookinstance/create", "book=77&imprint=Penguin&status=Available")
        .await;

    response.assert_view("bookinstance_form");
    assert_eq!(response.data()["errors"][0]["message"], "Book does not exist.");
}

#[tokio::test]
async fn test_update_copy_status_and_due_date() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    let emma = app.book("Emma", &austen, &[]).await;
    let copy = app.copy(&emma, "London, Penguin, 2003").await;

    let body = format!(
        "book={}&imprint=London%2C+Penguin%2C+2003&status=Loaned&due_back=2024-01-15",
        emma.id
    );
    let response = app
        .post_form(&format!("/catalog/bookinstance/{}/update", copy.id), &body)
        .await;

    response.assert_redirect(&format!("/catalog/bookinstance/{}", copy.id));
    let copies = app.store.book_instances_list().await.unwrap();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].id, copy.id);
    assert_eq!(copies[0].status, CopyStatus::Loaned);
    assert_eq!(copies[0].due_back, Some(date(2024, 1, 15)));
}

#[tokio::test]
async fn test_copy_list_and_detail() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    let emma = app.book("Emma", &austen, &[]).await;
    let copy = app.copy(&emma, "London, Penguin, 2003").await;

    let list = app.get("/catalog/bookinstances").await;
    list.assert_view("bookinstance_list");
    assert_eq!(list.data()["title"], "Book Instance List");
    assert_eq!(list.data()["bookinstance_list"][0]["book_title"], "Emma");

    let detail = app.get(&format!("/catalog/bookinstance/{}", copy.id)).await;
    detail.assert_view("bookinstance_detail");
    assert_eq!(detail.data()["title"], "Book");
    assert_eq!(detail.data()["bookinstance"]["status"], "Available");
    assert_eq!(detail.data()["bookinstance"]["book"]["title"], "Emma");

    let missing = app.get("/catalog/bookinstance/999").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["message"], "Book copy not found");
}

#[tokio::test]
async fn test_delete_copy() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    let emma = app.book("Emma", &austen, &[]).await;
    let copy = app.copy(&emma, "London, Penguin, 2003").await;

    let response = app
        .post_form(
            &format!("/catalog/bookinstance/{}/delete", copy.id),
            &format!("bookinstanceid={}", copy.id),
        )
        .await;

    response.assert_redirect("/catalog/bookinstances");
    assert_eq!(app.store.book_instances_count(None).await.unwrap(), 0);
}
