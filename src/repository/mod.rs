//! Repository layer: the catalog store contract and its backends
//!
//! Each record kind has its own store trait; [`CatalogStore`] is the union the
//! workflows hold. References between records are plain ids, resolved by
//! the caller and never cascaded by the store.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        author::AuthorFields, book::BookFields, book_instance::BookInstanceFields,
        genre::GenreFields, Author, Book, BookInstance, CopyStatus, Genre,
    },
};

pub use memory::MemoryStore;

#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// All authors by family name, then first name
    async fn authors_list(&self) -> AppResult<Vec<Author>>;
    async fn authors_get_by_id(&self, id: i32) -> AppResult<Option<Author>>;
    async fn authors_count(&self) -> AppResult<i64>;
    async fn authors_create(&self, data: &AuthorFields) -> AppResult<Author>;
    /// `None` when no author has this id
    async fn authors_update(&self, id: i32, data: &AuthorFields) -> AppResult<Option<Author>>;
    /// `false` when no author has this id
    async fn authors_delete(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait GenreStore: Send + Sync {
    /// All genres by name
    async fn genres_list(&self) -> AppResult<Vec<Genre>>;
    async fn genres_get_by_id(&self, id: i32) -> AppResult<Option<Genre>>;
    async fn genres_count(&self) -> AppResult<i64>;
    async fn genres_create(&self, data: &GenreFields) -> AppResult<Genre>;
    async fn genres_update(&self, id: i32, data: &GenreFields) -> AppResult<Option<Genre>>;
    async fn genres_delete(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books by title
    async fn books_list(&self) -> AppResult<Vec<Book>>;
    async fn books_get_by_id(&self, id: i32) -> AppResult<Option<Book>>;
    /// Books written by an author, by title
    async fn books_by_author(&self, author_id: i32) -> AppResult<Vec<Book>>;
    /// Books classified under a genre, by title
    async fn books_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>>;
    async fn books_count(&self) -> AppResult<i64>;
    async fn books_create(&self, data: &BookFields) -> AppResult<Book>;
    async fn books_update(&self, id: i32, data: &BookFields) -> AppResult<Option<Book>>;
    async fn books_delete(&self, id: i32) -> AppResult<bool>;
}

#[async_trait]
pub trait BookInstanceStore: Send + Sync {
    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>>;
    async fn book_instances_get_by_id(&self, id: i32) -> AppResult<Option<BookInstance>>;
    /// Copies of a book
    async fn book_instances_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>>;
    /// Number of copies, optionally only those in `status`
    async fn book_instances_count(&self, status: Option<CopyStatus>) -> AppResult<i64>;
    async fn book_instances_create(&self, data: &BookInstanceFields) -> AppResult<BookInstance>;
    async fn book_instances_update(&self, id: i32, data: &BookInstanceFields) -> AppResult<Option<BookInstance>>;
    async fn book_instances_delete(&self, id: i32) -> AppResult<bool>;
}

/// Everything the catalog workflows need from storage
pub trait CatalogStore: AuthorStore + GenreStore + BookStore + BookInstanceStore {}

impl<T> CatalogStore for T where T: AuthorStore + GenreStore + BookStore + BookInstanceStore {}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}
