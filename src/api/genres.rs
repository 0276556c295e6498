//! Genre endpoints

use axum::{
    extract::{Path, State},
    response::Response,
};
use utoipa::ToSchema;

use super::{form_data, respond, CatalogForm};
use crate::{error::AppResult, AppState};

/// Genre form fields, urlencoded
#[derive(ToSchema)]
pub struct GenreFormBody {
    /// 3 to 100 characters
    pub name: String,
}

/// Deletion confirmation, urlencoded
#[derive(ToSchema)]
pub struct GenreDeleteBody {
    /// Must equal the path ID
    pub genreid: i32,
}

/// List all genres
#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "genres",
    responses(
        (status = 200, description = "View `genre_list`, sorted by name")
    )
)]
pub async fn genre_list(State(state): State<AppState>) -> AppResult<Response> {
    let outcome = state.services.genres.list().await?;
    respond(&state, outcome)
}

/// Genre details with its books
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "View `genre_detail`"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_detail(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Response> {
    let outcome = state.services.genres.detail(id).await?;
    respond(&state, outcome)
}

/// Empty genre form
#[utoipa::path(
    get,
    path = "/catalog/genre/create",
    tag = "genres",
    responses((status = 200, description = "View `genre_form`"))
)]
pub async fn genre_create_form(State(state): State<AppState>) -> AppResult<Response> {
    let outcome = state.services.genres.create_form().await?;
    respond(&state, outcome)
}

/// Create a genre, or redirect to an existing genre with the same name
#[utoipa::path(
    post,
    path = "/catalog/genre/create",
    tag = "genres",
    request_body(content = GenreFormBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "View `genre_form` with errors"),
        (status = 303, description = "Created, redirect to the new genre")
    )
)]
pub async fn genre_create(State(state): State<AppState>, form: CatalogForm) -> AppResult<Response> {
    let outcome = state.services.genres.create(&form_data(form)).await?;
    respond(&state, outcome)
}

/// Deletion confirmation
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "View `genre_delete` with the genre's books"),
        (status = 303, description = "Genre already gone, redirect to the list")
    )
)]
pub async fn genre_delete_form(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Response> {
    let outcome = state.services.genres.delete_form(id).await?;
    respond(&state, outcome)
}

/// Delete a genre no book is classified under
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body(content = GenreDeleteBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Refused: view `genre_delete` listing the genre's books"),
        (status = 303, description = "Deleted, redirect to the list"),
        (status = 400, description = "genreid missing or different from the path", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    form: CatalogForm,
) -> AppResult<Response> {
    let outcome = state.services.genres.delete(id, &form_data(form)).await?;
    respond(&state, outcome)
}

/// Genre form pre-populated
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "View `genre_form`"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_update_form(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Response> {
    let outcome = state.services.genres.update_form(id).await?;
    respond(&state, outcome)
}

/// Rename a genre
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body(content = GenreFormBody, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "View `genre_form` with errors"),
        (status = 303, description = "Updated, redirect to the genre"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn genre_update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    form: CatalogForm,
) -> AppResult<Response> {
    let outcome = state.services.genres.update(id, &form_data(form)).await?;
    respond(&state, outcome)
}
