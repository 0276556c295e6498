//! Book workflow configuration

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::workflow::{Dependents, Entity};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::AuthorSummary,
        book::{book_url, Book, BookDetail, BookFields, BookForm, BookListing},
        book_instance::BookInstanceListing,
        genre::GenreOption,
        Author, Genre,
    },
    repository::CatalogStore,
    validation::{FieldError, FieldSpec, Rule, Sanitized, Schema},
};

static BOOK_SCHEMA: Schema = Schema::new(&[
    FieldSpec::required("title", &[Rule::MinLength(1, "Title must not be empty.")]),
    FieldSpec::required("author", &[Rule::MinLength(1, "Author must not be empty.")]),
    FieldSpec::required("summary", &[Rule::MinLength(1, "Summary must not be empty.")]),
    FieldSpec::required("isbn", &[Rule::MinLength(1, "ISBN must not be empty.")]),
    FieldSpec::multiple("genre"),
]);

/// Authors and genres offered on the book form
#[derive(Debug, Clone, Default)]
pub struct BookReferences {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

/// Books; deletion is blocked while copies of the book exist
#[derive(Debug, Clone, Copy, Default)]
pub struct Books;

#[async_trait]
impl Entity for Books {
    type Record = Book;
    type Listing = BookListing;
    type Detail = BookDetail;
    type Dependent = BookInstanceListing;
    type References = BookReferences;
    type Form = BookForm;
    type Fields = BookFields;

    const KEY: &'static str = "book";
    const LABEL: &'static str = "Book";
    const LIST_TITLE: &'static str = "Book List";
    const LIST_PATH: &'static str = "/catalog/books";
    const DELETE_FIELD: &'static str = "bookid";
    const DEPENDENTS: Option<Dependents> = Some(Dependents {
        key: "book_instances",
        label: "copies",
    });

    fn schema(&self) -> &'static Schema {
        &BOOK_SCHEMA
    }

    fn detail_url(&self, id: i32) -> String {
        book_url(id)
    }

    fn record_id(&self, record: &Book) -> i32 {
        record.id
    }

    async fn list(&self, store: &dyn CatalogStore) -> AppResult<Vec<BookListing>> {
        let (books, authors) = tokio::try_join!(store.books_list(), store.authors_list())?;
        let authors: HashMap<i32, &Author> = authors.iter().map(|a| (a.id, a)).collect();
        Ok(books
            .iter()
            .map(|book| BookListing::new(book, authors.get(&book.author_id).copied()))
            .collect())
    }

    async fn find(&self, store: &dyn CatalogStore, id: i32) -> AppResult<Option<Book>> {
        store.books_get_by_id(id).await
    }

    async fn dependents(&self, store: &dyn CatalogStore, id: i32) -> AppResult<Vec<BookInstanceListing>> {
        let instances = store.book_instances_by_book(id).await?;
        Ok(instances
            .iter()
            .map(|instance| BookInstanceListing::new(instance, None))
            .collect())
    }

    async fn resolve(&self, store: &dyn CatalogStore, record: Book) -> AppResult<BookDetail> {
        let (author, genres) = tokio::try_join!(
            store.authors_get_by_id(record.author_id),
            store.genres_list(),
        )?;
        let genres = genres
            .into_iter()
            .filter(|genre| record.genre_ids.contains(&genre.id))
            .collect();
        Ok(BookDetail {
            url: record.url(),
            book: record,
            author,
            genres,
        })
    }

    fn detail_title(&self, detail: &BookDetail) -> String {
        detail.book.title.clone()
    }

    async fn references(&self, store: &dyn CatalogStore) -> AppResult<BookReferences> {
        let (authors, genres) = tokio::try_join!(store.authors_list(), store.genres_list())?;
        Ok(BookReferences { authors, genres })
    }

    fn form_context(&self, references: &BookReferences, form: &BookForm) -> AppResult<Map<String, Value>> {
        let authors: Vec<AuthorSummary> = references.authors.iter().map(AuthorSummary::from).collect();
        let genres: Vec<GenreOption> = references
            .genres
            .iter()
            .map(|genre| GenreOption {
                id: genre.id,
                name: genre.name.clone(),
                checked: form.genre.contains(&genre.id.to_string()),
            })
            .collect();

        let mut context = Map::new();
        context.insert("authors".to_string(), to_value(&authors)?);
        context.insert("genres".to_string(), to_value(&genres)?);
        context.insert(
            "selected_author".to_string(),
            form.author.parse::<i32>().map(Value::from).unwrap_or(Value::Null),
        );
        Ok(context)
    }

    fn form_from_record(&self, record: &Book) -> BookForm {
        BookForm::from(record)
    }

    fn candidate(&self, id: Option<i32>, values: &Sanitized) -> BookForm {
        BookForm {
            id,
            title: values.text("title").to_string(),
            author: values.text("author").to_string(),
            summary: values.text("summary").to_string(),
            isbn: values.text("isbn").to_string(),
            genre: values.list("genre").to_vec(),
        }
    }

    fn fields(&self, form: &BookForm, references: &BookReferences) -> Result<BookFields, Vec<FieldError>> {
        let mut errors = Vec::new();

        let author_id = form
            .author
            .parse::<i32>()
            .ok()
            .filter(|id| references.authors.iter().any(|author| author.id == *id));
        if author_id.is_none() {
            errors.push(FieldError::new("author", "Author does not exist.", form.author.clone()));
        }

        let mut genre_ids = BTreeSet::new();
        for raw in &form.genre {
            match raw.parse::<i32>() {
                Ok(id) if references.genres.iter().any(|genre| genre.id == id) => {
                    genre_ids.insert(id);
                }
                _ => errors.push(FieldError::new("genre", "Genre does not exist.", raw.clone())),
            }
        }

        match author_id {
            Some(author_id) if errors.is_empty() => Ok(BookFields {
                title: form.title.clone(),
                summary: form.summary.clone(),
                isbn: form.isbn.clone(),
                author_id,
                genre_ids,
            }),
            _ => Err(errors),
        }
    }

    async fn insert(&self, store: &dyn CatalogStore, fields: &BookFields) -> AppResult<Book> {
        store.books_create(fields).await
    }

    async fn update(&self, store: &dyn CatalogStore, id: i32, fields: &BookFields) -> AppResult<Option<Book>> {
        store.books_update(id, fields).await
    }

    async fn remove(&self, store: &dyn CatalogStore, id: i32) -> AppResult<bool> {
        store.books_delete(id).await
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(format!("Cannot serialize form context: {}", e)))
}
