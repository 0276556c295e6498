//! Book model and related types

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{author::Author, genre::Genre};

pub fn book_url(id: i32) -> String {
    format!("/catalog/book/{}", id)
}

/// Full book model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    /// Author reference
    pub author_id: i32,
    /// Genre references, ascending
    pub genre_ids: Vec<i32>,
}

impl Book {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

/// Title and summary projection used on author, genre and delete pages
#[derive(Debug, Clone, Serialize)]
pub struct BookBrief {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl From<&Book> for BookBrief {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
            url: book.url(),
        }
    }
}

/// Book list row with its author resolved to a display name
#[derive(Debug, Clone, Serialize)]
pub struct BookListing {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
}

impl BookListing {
    pub fn new(book: &Book, author: Option<&Author>) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            url: book.url(),
            author_name: author.map(Author::name),
            author_url: author.map(Author::url),
        }
    }
}

/// Book with author and genres resolved
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub url: String,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
}

/// Validated book values, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct BookFields {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: i32,
    pub genre_ids: BTreeSet<i32>,
}

/// Book form values as displayed to the operator
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookForm {
    pub id: Option<i32>,
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            id: Some(book.id),
            title: book.title.clone(),
            author: book.author_id.to_string(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: book.genre_ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}
