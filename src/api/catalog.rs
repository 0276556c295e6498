//! Catalog home

use axum::{extract::State, response::Response};

use super::respond;
use crate::{error::AppResult, AppState};

/// Home page with record counts
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "View `index` with book, copy, available copy, author and genre counts")
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Response> {
    let outcome = state.services.catalog.index().await?;
    respond(&state, outcome)
}
