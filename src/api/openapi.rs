//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, books, catalog, genres, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Local Library API",
        version = "0.1.0",
        description = "Server-rendered catalog of authors, books, genres and book copies. \
                       Pages are returned as named views; successful writes answer 303 See Other.",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Home
        catalog::index,
        // Authors
        authors::author_list,
        authors::author_detail,
        authors::author_create_form,
        authors::author_create,
        authors::author_delete_form,
        authors::author_delete,
        authors::author_update_form,
        authors::author_update,
        // Books
        books::book_list,
        books::book_detail,
        books::book_create_form,
        books::book_create,
        books::book_delete_form,
        books::book_delete,
        books::book_update_form,
        books::book_update,
        // Genres
        genres::genre_list,
        genres::genre_detail,
        genres::genre_create_form,
        genres::genre_create,
        genres::genre_delete_form,
        genres::genre_delete,
        genres::genre_update_form,
        genres::genre_update,
        // Book instances
        book_instances::book_instance_list,
        book_instances::book_instance_detail,
        book_instances::book_instance_create_form,
        book_instances::book_instance_create,
        book_instances::book_instance_delete_form,
        book_instances::book_instance_delete,
        book_instances::book_instance_update_form,
        book_instances::book_instance_update,
    ),
    components(
        schemas(
            crate::models::Author,
            crate::models::Book,
            crate::models::Genre,
            crate::models::BookInstance,
            crate::models::CopyStatus,
            authors::AuthorFormBody,
            authors::AuthorDeleteBody,
            books::BookFormBody,
            books::BookDeleteBody,
            genres::GenreFormBody,
            genres::GenreDeleteBody,
            book_instances::BookInstanceFormBody,
            book_instances::BookInstanceDeleteBody,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Catalog home"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book management"),
        (name = "genres", description = "Genre management"),
        (name = "bookinstances", description = "Book copy management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
