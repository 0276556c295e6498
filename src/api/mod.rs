//! HTTP boundary for the catalog
//!
//! Handlers turn path ids and form bodies into workflow calls and hand the
//! resulting [`Outcome`] to [`respond`].

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::{
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppResult, validation::FormData, views::Outcome, AppState};

/// Urlencoded form body. Kept as ordered pairs so repeated keys such as
/// `genre` survive extraction.
pub type CatalogForm = axum::Form<Vec<(String, String)>>;

pub(crate) fn form_data(form: CatalogForm) -> FormData {
    FormData::from(form.0)
}

/// Render a view through the configured renderer, or redirect with 303 See Other
pub fn respond(state: &AppState, outcome: Outcome) -> AppResult<Response> {
    match outcome {
        Outcome::Render(view) => state.renderer.render(view),
        Outcome::Redirect(location) => Ok(Redirect::to(&location).into_response()),
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Authors
        .route("/authors", get(authors::author_list))
        .route("/author/create", get(authors::author_create_form).post(authors::author_create))
        .route("/author/:id", get(authors::author_detail))
        .route("/author/:id/delete", get(authors::author_delete_form).post(authors::author_delete))
        .route("/author/:id/update", get(authors::author_update_form).post(authors::author_update))
        // Books
        .route("/books", get(books::book_list))
        .route("/book/create", get(books::book_create_form).post(books::book_create))
        .route("/book/:id", get(books::book_detail))
        .route("/book/:id/delete", get(books::book_delete_form).post(books::book_delete))
        .route("/book/:id/update", get(books::book_update_form).post(books::book_update))
        // Genres
        .route("/genres", get(genres::genre_list))
        .route("/genre/create", get(genres::genre_create_form).post(genres::genre_create))
        .route("/genre/:id", get(genres::genre_detail))
        .route("/genre/:id/delete", get(genres::genre_delete_form).post(genres::genre_delete))
        .route("/genre/:id/update", get(genres::genre_update_form).post(genres::genre_update))
        // Book instances
        .route("/bookinstances", get(book_instances::book_instance_list))
        .route(
            "/bookinstance/create",
            get(book_instances::book_instance_create_form).post(book_instances::book_instance_create),
        )
        .route("/bookinstance/:id", get(book_instances::book_instance_detail))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::book_instance_delete_form).post(book_instances::book_instance_delete),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::book_instance_update_form).post(book_instances::book_instance_update),
        );

    let app = Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .with_state(state);

    app.merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
