//! Book instance endpoints

use axum::{
    extract::{Path, State},
    response::Response,
};
use utoipa::ToSchema;

use super::{form_data, respond, CatalogForm};
use crate::{error::AppResult, AppState};

/// Book instance form fields, urlencoded
#[derive(ToSchema)]
pub struct BookInstanceFormBody {
    /// Book ID
    pub book: String,
    pub imprint: String,
    /// Available, Maintenance, Loaned or Reserved; Maintenance when empty
    pub status: Option<String>,
    /// `YYYY-MM-DD`
    pub due_back: Option<String>,
}

/// Deletion confirmation, urlencoded
#[derive(ToSchema)]
pub struct BookInstanceDeleteBody {
    /// Must equal the path ID
    pub bookinstanceid: i32,
}

/// List all copies with their book titles
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "View `bookinstance_list`")
    )
)]
pub async fn book_instance_list(State(state): State<AppState>) -> AppResult<Response> {
    let outcome = state.services.book_instances.list().await?;
    respond(&state, outcome)
}

/// Copy details with its book
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "View `bookinstance_detail`"),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_instance_detail(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Response> {
    let outcome = state.services.book_instances.detail(id).await?;
    respond(&state, outcome)
}

/// Empty copy form with book choices
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses((status = 200, description = "View `bookinstance_form`"))
)]
pub async fn book_instance_create_form(State(state): State<AppState>) -> AppResult<Response> {
    let outcome = state.services.book_instances.create_form().await?;
    respond(&state, outcome)
}

/// Create a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    request_body(content = BookInstanceFormBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "View `bookinstance_form` with errors"),
        (status = 303, description = "Created, redirect to the new copy")
    )
)]
pub async fn book_instance_create(State(state): State<AppState>, form: CatalogForm) -> AppResult<Response> {
    let outcome = state.services.book_instances.create(&form_data(form)).await?;
    respond(&state, outcome)
}

/// Deletion confirmation
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "View `bookinstance_delete`"),
        (status = 303, description = "Copy already gone, redirect to the list")
    )
)]
pub async fn book_instance_delete_form(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Response> {
    let outcome = state.services.book_instances.delete_form(id).await?;
    respond(&state, outcome)
}

/// Delete a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book instance ID")),
    request_body(content = BookInstanceDeleteBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Deleted, redirect to the list"),
        (status = 400, description = "bookinstanceid missing or different from the path", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_instance_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    form: CatalogForm,
) -> AppResult<Response> {
    let outcome = state.services.book_instances.delete(id, &form_data(form)).await?;
    respond(&state, outcome)
}

/// Copy form pre-populated
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "View `bookinstance_form`"),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_instance_update_form(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Response> {
    let outcome = state.services.book_instances.update_form(id).await?;
    respond(&state, outcome)
}

/// Update a copy in place
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Book instance ID")),
    request_body(content = BookInstanceFormBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "View `bookinstance_form` with errors"),
        (status = 303, description = "Updated, redirect to the copy"),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_instance_update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    form: CatalogForm,
) -> AppResult<Response> {
    let outcome = state.services.book_instances.update(id, &form_data(form)).await?;
    respond(&state, outcome)
}
