use axum::http::StatusCode;
use local_library_server::repository::AuthorStore;

use crate::common::{date, TestApp};

#[tokio::test]
async fn test_create_author_redirects_to_detail() {
    let app = TestApp::new();

    let response = app
        .post_form("/catalog/author/create", "first_name=Jane&family_name=Austen&date_of_birth=&date_of_death=")
        .await;

    let authors = app.store.authors_list().await.unwrap();
    assert_eq!(authors.len(), 1);
    let author = &authors[0];
    assert_eq!((author.first_name.as_str(), author.family_name.as_str()), ("Jane", "Austen"));
    assert_eq!(author.date_of_birth, None);
    assert_eq!(author.date_of_death, None);
    response.assert_redirect(&format!("/catalog/author/{}", author.id));
}

#[tokio::test]
async fn test_create_author_with_empty_first_name_is_rejected() {
    let app = TestApp::new();

    let response = app
        .post_form("/catalog/author/create", "first_name=&family_name=Austen")
        .await;

    response.assert_view("author_form");
    let errors = response.data()["errors"].as_array().unwrap();
    assert_eq!(errors[0]["field"], "first_name");
    assert!(errors[0]["message"].as_str().unwrap().contains("must be specified"));
    assert_eq!(response.data()["author"]["family_name"], "Austen");
    assert!(app.store.authors_list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_author_with_bad_date() {
    let app = TestApp::new();

    let response = app
        .post_form("/catalog/author/create", "first_name=Jane&family_name=Austen&date_of_birth=16-12-1775")
        .await;

    response.assert_view("author_form");
    assert_eq!(response.data()["errors"][0]["message"], "Invalid date of birth");
}

#[tokio::test]
async fn test_overlong_names_are_rejected() {
    let app = TestApp::new();
    let long = "a".repeat(101);

    let response = app
        .post_form("/catalog/author/create", &format!("first_name={}&family_name={}", long, long))
        .await;

    response.assert_view("author_form");
    let messages: Vec<&str> = response.data()["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(
        messages,
        [
            "First name must contain at most 100 characters",
            "Family name must contain at most 100 characters"
        ]
    );
    assert!(app.store.authors_list().await.unwrap().is_empty());

    let exact = "b".repeat(100);
    let accepted = app
        .post_form("/catalog/author/create", &format!("first_name={}&family_name=Austen", exact))
        .await;
    assert_eq!(accepted.status, StatusCode::SEE_OTHER);
    assert_eq!(app.store.authors_list().await.unwrap()[0].first_name, exact);
}

#[tokio::test]
async fn test_author_list_is_sorted() {
    let app = TestApp::new();
    app.author("Mary", "Shelley").await;
    app.author("Jane", "Austen").await;
    app.author("Charlotte", "Bronte").await;

    let response = app.get("/catalog/authors").await;

    response.assert_view("author_list");
    assert_eq!(response.data()["title"], "Author List");
    let names: Vec<&str> = response.data()["author_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Austen, Jane", "Bronte, Charlotte", "Shelley, Mary"]);
}

#[tokio::test]
async fn test_author_detail_lists_books() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    app.book("Persuasion", &austen, &[]).await;
    app.book("Emma", &austen, &[]).await;

    let response = app.get(&format!("/catalog/author/{}", austen.id)).await;

    response.assert_view("author_detail");
    assert_eq!(response.data()["title"], "Author Detail");
    assert_eq!(response.data()["author"]["name"], "Austen, Jane");
    assert_eq!(response.data()["author_books"][0]["title"], "Emma");
    assert_eq!(response.data()["author_books"][1]["title"], "Persuasion");
}

#[tokio::test]
async fn test_missing_author_is_not_found() {
    let app = TestApp::new();

    assert_eq!(app.get("/catalog/author/42").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/catalog/author/42/update").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_keeps_identity() {
    let app = TestApp::new();
    let author = app.author("Jane", "Austin").await;

    let response = app
        .post_form(
            &format!("/catalog/author/{}/update", author.id),
            "first_name=Jane&family_name=Austen&date_of_birth=1775-12-16&date_of_death=1817-07-18",
        )
        .await;

    response.assert_redirect(&format!("/catalog/author/{}", author.id));
    let authors = app.store.authors_list().await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].id, author.id);
    assert_eq!(authors[0].family_name, "Austen");
    assert_eq!(authors[0].date_of_birth, Some(date(1775, 12, 16)));
    assert_eq!(authors[0].date_of_death, Some(date(1817, 7, 18)));
}

#[tokio::test]
async fn test_invalid_update_leaves_record_untouched() {
    let app = TestApp::new();
    let author = app.author("Jane", "Austen").await;

    let response = app
        .post_form(&format!("/catalog/author/{}/update", author.id), "first_name=J@ne&family_name=Austen")
        .await;

    response.assert_view("author_form");
    assert_eq!(response.data()["title"], "Update Author");
    assert_eq!(response.data()["errors"][0]["message"], "First name has non-alphanumeric characters.");
    let stored = app.store.authors_get_by_id(author.id).await.unwrap().unwrap();
    assert_eq!(stored, author);
}

#[tokio::test]
async fn test_delete_author_with_books_is_refused() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    app.book("Emma", &austen, &[]).await;

    let response = app
        .post_form(&format!("/catalog/author/{}/delete", austen.id), &format!("authorid={}", austen.id))
        .await;

    response.assert_view("author_delete");
    assert_eq!(response.data()["author_books"].as_array().unwrap().len(), 1);
    assert!(response.data()["refusal"].is_string());
    assert!(app.store.authors_get_by_id(austen.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_author_without_books() {
    let app = TestApp::new();
    let author = app.author("Mary", "Shelley").await;

    let confirm = app.get(&format!("/catalog/author/{}/delete", author.id)).await;
    confirm.assert_view("author_delete");
    assert_eq!(confirm.data()["title"], "Delete Author");

    let response = app
        .post_form(&format!("/catalog/author/{}/delete", author.id), &format!("authorid={}", author.id))
        .await;

    response.assert_redirect("/catalog/authors");
    assert!(app.store.authors_get_by_id(author.id).await.unwrap().is_none());

    // Deleting again is not an error
    let again = app.get(&format!("/catalog/author/{}/delete", author.id)).await;
    again.assert_redirect("/catalog/authors");
}

#[tokio::test]
async fn test_delete_with_mismatched_body_id_is_rejected() {
    let app = TestApp::new();
    let shelley = app.author("Mary", "Shelley").await;
    let austen = app.author("Jane", "Austen").await;

    let response = app
        .post_form(&format!("/catalog/author/{}/delete", shelley.id), &format!("authorid={}", austen.id))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.authors_count().await.unwrap(), 2);
}
