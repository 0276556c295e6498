use local_library_server::repository::{BookInstanceStore, BookStore};

use crate::common::TestApp;

#[tokio::test]
async fn test_create_book_with_genres() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    let romance = app.genre("Romance").await;
    let satire = app.genre("Satire").await;

    let body = format!(
        "title=Emma&author={}&summary=A+matchmaker&isbn=9780141439587&genre={}&genre={}&genre={}",
        austen.id, romance.id, satire.id, romance.id
    );
    let response = app.post_form("/catalog/book/create", &body).await;

    let books = app.store.books_list().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].summary, "A matchmaker");
    assert_eq!(books[0].author_id, austen.id);
    assert_eq!(books[0].genre_ids, vec![romance.id, satire.id]);
    response.assert_redirect(&format!("/catalog/book/{}", books[0].id));
}

#[tokio::test]
async fn test_create_book_errors_keep_genre_selection() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    let romance = app.genre("Romance").await;
    app.genre("Satire").await;

    let body = format!("title=&author={}&summary=S&isbn=1&genre={}", austen.id, romance.id);
    let response = app.post_form("/catalog/book/create", &body).await;

    response.assert_view("book_form");
    assert_eq!(response.data()["title"], "Create Book");
    assert_eq!(response.data()["errors"][0]["message"], "Title must not be empty.");
    assert_eq!(response.data()["selected_author"], austen.id);
    let genres = response.data()["genres"].as_array().unwrap();
    assert_eq!(genres[0]["name"], "Romance");
    assert_eq!(genres[0]["checked"], true);
    assert_eq!(genres[1]["checked"], false);
    assert!(app.store.books_list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_book_with_unknown_references() {
    let app = TestApp::new();

    let response = app
        .post_form("/catalog/book/create", "title=Emma&author=99&summary=S&isbn=1&genre=98")
        .await;

    response.assert_view("book_form");
    let messages: Vec<&str> = response.data()["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert_eq!(messages, ["Author does not exist.", "Genre does not exist."]);
    assert!(app.store.books_list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_book_list_and_detail() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    let romance = app.genre("Romance").await;
    let persuasion = app.book("Persuasion", &austen, &[&romance]).await;
    app.book("Emma", &austen, &[]).await;
    app.copy(&persuasion, "London, Penguin, 2003").await;

    let list = app.get("/catalog/books").await;
    list.assert_view("book_list");
    assert_eq!(list.data()["book_list"][0]["title"], "Emma");
    assert_eq!(list.data()["book_list"][1]["author_name"], "Austen, Jane");

    let detail = app.get(&format!("/catalog/book/{}", persuasion.id)).await;
    detail.assert_view("book_detail");
    assert_eq!(detail.data()["title"], "Persuasion");
    assert_eq!(detail.data()["book"]["author"]["family_name"], "Austen");
    assert_eq!(detail.data()["book"]["genres"][0]["name"], "Romance");
    assert_eq!(detail.data()["book_instances"][0]["imprint"], "London, Penguin, 2003");
}

#[tokio::test]
async fn test_delete_book_with_copies_is_refused() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    let emma = app.book("Emma", &austen, &[]).await;
    app.copy(&emma, "London, Penguin, 2003").await;
    app.copy(&emma, "New York, Vintage, 2012").await;

    let response = app
        .post_form(&format!("/catalog/book/{}/delete", emma.id), &format!("bookid={}", emma.id))
        .await;

    response.assert_view("book_delete");
    assert_eq!(response.data()["book_instances"].as_array().unwrap().len(), 2);
    assert_eq!(
        response.data()["refusal"],
        "Delete the following copies before attempting to delete this book."
    );
    assert!(app.store.books_get_by_id(emma.id).await.unwrap().is_some());
    assert_eq!(app.store.book_instances_by_book(emma.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_book_without_copies() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    let emma = app.book("Emma", &austen, &[]).await;

    let response = app
        .post_form(&format!("/catalog/book/{}/delete", emma.id), &format!("bookid={}", emma.id))
        .await;

    response.assert_redirect("/catalog/books");
    assert!(app.store.books_get_by_id(emma.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_form_marks_selections() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    let romance = app.genre("Romance").await;
    let satire = app.genre("Satire").await;
    let emma = app.book("Emma", &austen, &[&satire]).await;

    let response = app.get(&format!("/catalog/book/{}/update", emma.id)).await;

    response.assert_view("book_form");
    assert_eq!(response.data()["title"], "Update Book");
    assert_eq!(response.data()["book"]["title"], "Emma");
    assert_eq!(response.data()["selected_author"], austen.id);
    let checked: Vec<bool> = response.data()["genres"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["checked"].as_bool().unwrap())
        .collect();
    assert_eq!(checked, [false, true]);
    assert_eq!(response.data()["genres"][0]["id"], romance.id);
}

#[tokio::test]
async fn test_update_book_replaces_genres() {
    let app = TestApp::new();
    let austen = app.author("Jane", "Austen").await;
    let romance = app.genre("Romance").await;
    let satire = app.genre("Satire").await;
    let emma = app.book("Emma", &austen, &[&romance]).await;

    let body = format!(
        "title=Emma&author={}&summary=Revised&isbn=9780141439587&genre={}",
        austen.id, satire.id
    );
    let response = app.post_form(&format!("/catalog/book/{}/update", emma.id), &body).await;

    response.assert_redirect(&format!("/catalog/book/{}", emma.id));
    let stored = app.store.books_get_by_id(emma.id).await.unwrap().unwrap();
    assert_eq!(stored.summary, "Revised");
    assert_eq!(stored.genre_ids, vec![satire.id]);
}
