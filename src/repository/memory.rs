//! In-process catalog store
//!
//! Used when `database.in_memory` is set and by the test suites. Every
//! operation takes the lock once and releases it before returning.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AuthorStore, BookInstanceStore, BookStore, GenreStore};
use crate::{
    error::AppResult,
    models::{
        author::AuthorFields, book::BookFields, book_instance::BookInstanceFields,
        genre::GenreFields, Author, Book, BookInstance, CopyStatus, Genre,
    },
};

#[derive(Default)]
struct Tables {
    authors: BTreeMap<i32, Author>,
    genres: BTreeMap<i32, Genre>,
    books: BTreeMap<i32, Book>,
    book_instances: BTreeMap<i32, BookInstance>,
    last_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_title(mut books: Vec<Book>) -> Vec<Book> {
    books.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
    books
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let tables = self.tables.read().await;
        let mut authors: Vec<Author> = tables.authors.values().cloned().collect();
        authors.sort_by(|a, b| {
            a.family_name
                .cmp(&b.family_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
                .then(a.id.cmp(&b.id))
        });
        Ok(authors)
    }

    async fn authors_get_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        Ok(self.tables.read().await.authors.get(&id).cloned())
    }

    async fn authors_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.authors.len() as i64)
    }

    async fn authors_create(&self, data: &AuthorFields) -> AppResult<Author> {
        let mut tables = self.tables.write().await;
        let author = Author {
            id: tables.next_id(),
            first_name: data.first_name.clone(),
            family_name: data.family_name.clone(),
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        };
        tables.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn authors_update(&self, id: i32, data: &AuthorFields) -> AppResult<Option<Author>> {
        let mut tables = self.tables.write().await;
        Ok(tables.authors.get_mut(&id).map(|author| {
            author.first_name = data.first_name.clone();
            author.family_name = data.family_name.clone();
            author.date_of_birth = data.date_of_birth;
            author.date_of_death = data.date_of_death;
            author.clone()
        }))
    }

    async fn authors_delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.write().await.authors.remove(&id).is_some())
    }
}

#[async_trait]
impl GenreStore for MemoryStore {
    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let tables = self.tables.read().await;
        let mut genres: Vec<Genre> = tables.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(genres)
    }

    async fn genres_get_by_id(&self, id: i32) -> AppResult<Option<Genre>> {
        Ok(self.tables.read().await.genres.get(&id).cloned())
    }

    async fn genres_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.genres.len() as i64)
    }

    async fn genres_create(&self, data: &GenreFields) -> AppResult<Genre> {
        let mut tables = self.tables.write().await;
        let genre = Genre {
            id: tables.next_id(),
            name: data.name.clone(),
        };
        tables.genres.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn genres_update(&self, id: i32, data: &GenreFields) -> AppResult<Option<Genre>> {
        let mut tables = self.tables.write().await;
        Ok(tables.genres.get_mut(&id).map(|genre| {
            genre.name = data.name.clone();
            genre.clone()
        }))
    }

    async fn genres_delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.write().await.genres.remove(&id).is_some())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(by_title(tables.books.values().cloned().collect()))
    }

    async fn books_get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.tables.read().await.books.get(&id).cloned())
    }

    async fn books_by_author(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(by_title(
            tables
                .books
                .values()
                .filter(|book| book.author_id == author_id)
                .cloned()
                .collect(),
        ))
    }

    async fn books_by_genre(&self, genre_id: i32) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        Ok(by_title(
            tables
                .books
                .values()
                .filter(|book| book.genre_ids.contains(&genre_id))
                .cloned()
                .collect(),
        ))
    }

    async fn books_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.books.len() as i64)
    }

    async fn books_create(&self, data: &BookFields) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        let book = Book {
            id: tables.next_id(),
            title: data.title.clone(),
            summary: data.summary.clone(),
            isbn: data.isbn.clone(),
            author_id: data.author_id,
            genre_ids: data.genre_ids.iter().copied().collect(),
        };
        tables.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn books_update(&self, id: i32, data: &BookFields) -> AppResult<Option<Book>> {
        let mut tables = self.tables.write().await;
        Ok(tables.books.get_mut(&id).map(|book| {
            book.title = data.title.clone();
            book.summary = data.summary.clone();
            book.isbn = data.isbn.clone();
            book.author_id = data.author_id;
            book.genre_ids = data.genre_ids.iter().copied().collect();
            book.clone()
        }))
    }

    async fn books_delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.write().await.books.remove(&id).is_some())
    }
}

#[async_trait]
impl BookInstanceStore for MemoryStore {
    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        Ok(self.tables.read().await.book_instances.values().cloned().collect())
    }

    async fn book_instances_get_by_id(&self, id: i32) -> AppResult<Option<BookInstance>> {
        Ok(self.tables.read().await.book_instances.get(&id).cloned())
    }

    async fn book_instances_by_book(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let tables = self.tables.read().await;
        Ok(tables
            .book_instances
            .values()
            .filter(|instance| instance.book_id == book_id)
            .cloned()
            .collect())
    }

    async fn book_instances_count(&self, status: Option<CopyStatus>) -> AppResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .book_instances
            .values()
            .filter(|instance| status.map_or(true, |s| instance.status == s))
            .count();
        Ok(count as i64)
    }

    async fn book_instances_create(&self, data: &BookInstanceFields) -> AppResult<BookInstance> {
        let mut tables = self.tables.write().await;
        let instance = BookInstance {
            id: tables.next_id(),
            book_id: data.book_id,
            imprint: data.imprint.clone(),
            status: data.status,
            due_back: data.due_back,
        };
        tables.book_instances.insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn book_instances_update(&self, id: i32, data: &BookInstanceFields) -> AppResult<Option<BookInstance>> {
        let mut tables = self.tables.write().await;
        Ok(tables.book_instances.get_mut(&id).map(|instance| {
            instance.book_id = data.book_id;
            instance.imprint = data.imprint.clone();
            instance.status = data.status;
            instance.due_back = data.due_back;
            instance.clone()
        }))
    }

    async fn book_instances_delete(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.write().await.book_instances.remove(&id).is_some())
    }
}
