//! Author endpoints

use axum::{
    extract::{Path, State},
    response::Response,
};
use utoipa::ToSchema;

use super::{form_data, respond, CatalogForm};
use crate::{error::AppResult, AppState};

/// Author form fields, urlencoded
#[derive(ToSchema)]
pub struct AuthorFormBody {
    pub first_name: String,
    pub family_name: String,
    /// `YYYY-MM-DD`, empty when unknown
    pub date_of_birth: Option<String>,
    /// `YYYY-MM-DD`, empty when unknown
    pub date_of_death: Option<String>,
}

/// Deletion confirmation, urlencoded
#[derive(ToSchema)]
pub struct AuthorDeleteBody {
    /// Must equal the path ID
    pub authorid: i32,
}

/// List all authors
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "View `author_list`, sorted by family name then first name")
    )
)]
pub async fn author_list(State(state): State<AppState>) -> AppResult<Response> {
    let outcome = state.services.authors.list().await?;
    respond(&state, outcome)
}

/// Author details with their books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "View `author_detail`"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_detail(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Response> {
    let outcome = state.services.authors.detail(id).await?;
    respond(&state, outcome)
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses((status = 200, description = "View `author_form`"))
)]
pub async fn author_create_form(State(state): State<AppState>) -> AppResult<Response> {
    let outcome = state.services.authors.create_form().await?;
    respond(&state, outcome)
}

/// Create an author
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body(content = AuthorFormBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "View `author_form` with errors"),
        (status = 303, description = "Created, redirect to the new author")
    )
)]
pub async fn author_create(State(state): State<AppState>, form: CatalogForm) -> AppResult<Response> {
    let outcome = state.services.authors.create(&form_data(form)).await?;
    respond(&state, outcome)
}

/// Deletion confirmation
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "View `author_delete` with the author's books"),
        (status = 303, description = "Author already gone, redirect to the list")
    )
)]
pub async fn author_delete_form(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Response> {
    let outcome = state.services.authors.delete_form(id).await?;
    respond(&state, outcome)
}

/// Delete an author that has no books
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body(content = AuthorDeleteBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Refused: view `author_delete` listing the author's books"),
        (status = 303, description = "Deleted, redirect to the list"),
        (status = 400, description = "authorid missing or different from the path", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    form: CatalogForm,
) -> AppResult<Response> {
    let outcome = state.services.authors.delete(id, &form_data(form)).await?;
    respond(&state, outcome)
}

/// Author form pre-populated with the stored author
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "View `author_form`"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_update_form(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Response> {
    let outcome = state.services.authors.update_form(id).await?;
    respond(&state, outcome)
}

/// Update an author in place
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body(content = AuthorFormBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "View `author_form` with errors"),
        (status = 303, description = "Updated, redirect to the author"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    form: CatalogForm,
) -> AppResult<Response> {
    let outcome = state.services.authors.update(id, &form_data(form)).await?;
    respond(&state, outcome)
}
