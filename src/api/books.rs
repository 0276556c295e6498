//! Book endpoints

use axum::{
    extract::{Path, State},
    response::Response,
};
use utoipa::ToSchema;

use super::{form_data, respond, CatalogForm};
use crate::{error::AppResult, AppState};

/// Book form fields, urlencoded. `genre` may repeat.
#[derive(ToSchema)]
pub struct BookFormBody {
    pub title: String,
    /// Author ID
    pub author: String,
    pub summary: String,
    pub isbn: String,
    /// Genre IDs
    pub genre: Vec<String>,
}

/// Deletion confirmation, urlencoded
#[derive(ToSchema)]
pub struct BookDeleteBody {
    /// Must equal the path ID
    pub bookid: i32,
}

/// List all books
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "books",
    responses(
        (status = 200, description = "View `book_list`, sorted by title")
    )
)]
pub async fn book_list(State(state): State<AppState>) -> AppResult<Response> {
    let outcome = state.services.books.list().await?;
    respond(&state, outcome)
}

/// Book details with author, genres and copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "View `book_detail`"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_detail(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Response> {
    let outcome = state.services.books.detail(id).await?;
    respond(&state, outcome)
}

/// Empty book form with author and genre choices
#[utoipa::path(
    get,
    path = "/catalog/book/create",
    tag = "books",
    responses((status = 200, description = "View `book_form`"))
)]
pub async fn book_create_form(State(state): State<AppState>) -> AppResult<Response> {
    let outcome = state.services.books.create_form().await?;
    respond(&state, outcome)
}

/// Create a book
#[utoipa::path(
    post,
    path = "/catalog/book/create",
    tag = "books",
    request_body(content = BookFormBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "View `book_form` with errors"),
        (status = 303, description = "Created, redirect to the new book")
    )
)]
pub async fn book_create(State(state): State<AppState>, form: CatalogForm) -> AppResult<Response> {
    let outcome = state.services.books.create(&form_data(form)).await?;
    respond(&state, outcome)
}

/// Deletion confirmation
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "View `book_delete` with the book's copies"),
        (status = 303, description = "Book already gone, redirect to the list")
    )
)]
pub async fn book_delete_form(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Response> {
    let outcome = state.services.books.delete_form(id).await?;
    respond(&state, outcome)
}

/// Delete a book that has no copies
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body(content = BookDeleteBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Refused: view `book_delete` listing the book's copies"),
        (status = 303, description = "Deleted, redirect to the list"),
        (status = 400, description = "bookid missing or different from the path", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    form: CatalogForm,
) -> AppResult<Response> {
    let outcome = state.services.books.delete(id, &form_data(form)).await?;
    respond(&state, outcome)
}

/// Book form pre-populated with the stored book
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "View `book_form`"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_update_form(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Response> {
    let outcome = state.services.books.update_form(id).await?;
    respond(&state, outcome)
}

/// Update a book in place
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body(content = BookFormBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "View `book_form` with errors"),
        (status = 303, description = "Updated, redirect to the book"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    form: CatalogForm,
) -> AppResult<Response> {
    let outcome = state.services.books.update(id, &form_data(form)).await?;
    respond(&state, outcome)
}
