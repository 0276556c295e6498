//! Book instance workflow configuration

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::workflow::{Dependents, Entity};
use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{
            book_instance_url, BookInstance, BookInstanceDetail, BookInstanceFields, BookInstanceForm,
            BookInstanceListing, CopyStatus,
        },
        Book,
    },
    repository::CatalogStore,
    validation::{optional_date, FieldError, FieldSpec, Rule, Sanitized, Schema},
};

const STATUS_NAMES: &[&str] = &["Available", "Maintenance", "Loaned", "Reserved"];

static BOOK_INSTANCE_SCHEMA: Schema = Schema::new(&[
    FieldSpec::required("book", &[Rule::MinLength(1, "Book must be specified")]),
    FieldSpec::required("imprint", &[Rule::MinLength(1, "Imprint must be specified")]),
    FieldSpec::optional("status", &[Rule::OneOf(STATUS_NAMES, "Invalid status")]),
    FieldSpec::optional("due_back", &[Rule::IsoDate("Invalid date")]),
]);

/// Physical copies of a book; nothing references a copy, so deletion is never blocked
#[derive(Debug, Clone, Copy, Default)]
pub struct BookInstances;

#[async_trait]
impl Entity for BookInstances {
    type Record = BookInstance;
    type Listing = BookInstanceListing;
    type Detail = BookInstanceDetail;
    type Dependent = ();
    type References = Vec<Book>;
    type Form = BookInstanceForm;
    type Fields = BookInstanceFields;

    const KEY: &'static str = "bookinstance";
    const LABEL: &'static str = "Book Instance";
    const LIST_TITLE: &'static str = "Book Instance List";
    const LIST_PATH: &'static str = "/catalog/bookinstances";
    const DELETE_FIELD: &'static str = "bookinstanceid";
    const DEPENDENTS: Option<Dependents> = None;

    fn schema(&self) -> &'static Schema {
        &BOOK_INSTANCE_SCHEMA
    }

    fn detail_url(&self, id: i32) -> String {
        book_instance_url(id)
    }

    fn record_id(&self, record: &BookInstance) -> i32 {
        record.id
    }

    fn not_found(&self) -> AppError {
        AppError::NotFound("Book copy not found".to_string())
    }

    async fn list(&self, store: &dyn CatalogStore) -> AppResult<Vec<BookInstanceListing>> {
        let (instances, books) = tokio::try_join!(store.book_instances_list(), store.books_list())?;
        let books: HashMap<i32, &Book> = books.iter().map(|b| (b.id, b)).collect();
        Ok(instances
            .iter()
            .map(|instance| BookInstanceListing::new(instance, books.get(&instance.book_id).copied()))
            .collect())
    }

    async fn find(&self, store: &dyn CatalogStore, id: i32) -> AppResult<Option<BookInstance>> {
        store.book_instances_get_by_id(id).await
    }

    async fn resolve(&self, store: &dyn CatalogStore, record: BookInstance) -> AppResult<BookInstanceDetail> {
        let book = store.books_get_by_id(record.book_id).await?;
        Ok(BookInstanceDetail {
            url: record.url(),
            due_back_formatted: record.due_back_formatted(),
            instance: record,
            book,
        })
    }

    fn detail_title(&self, _detail: &BookInstanceDetail) -> String {
        "Book".to_string()
    }

    async fn references(&self, store: &dyn CatalogStore) -> AppResult<Vec<Book>> {
        store.books_list().await
    }

    fn form_context(&self, books: &Vec<Book>, form: &BookInstanceForm) -> AppResult<Map<String, Value>> {
        let book_list = serde_json::to_value(books)
            .map_err(|e| AppError::Internal(format!("Cannot serialize book list: {}", e)))?;

        let mut context = Map::new();
        context.insert("book_list".to_string(), book_list);
        context.insert(
            "selected_book".to_string(),
            form.book.parse::<i32>().map(Value::from).unwrap_or(Value::Null),
        );
        context.insert(
            "statuses".to_string(),
            Value::from(STATUS_NAMES.iter().map(|s| Value::from(*s)).collect::<Vec<_>>()),
        );
        Ok(context)
    }

    fn form_from_record(&self, record: &BookInstance) -> BookInstanceForm {
        BookInstanceForm::from(record)
    }

    fn candidate(&self, id: Option<i32>, values: &Sanitized) -> BookInstanceForm {
        BookInstanceForm {
            id,
            book: values.text("book").to_string(),
            imprint: values.text("imprint").to_string(),
            status: values.text("status").to_string(),
            due_back: values.text("due_back").to_string(),
        }
    }

    fn fields(&self, form: &BookInstanceForm, books: &Vec<Book>) -> Result<BookInstanceFields, Vec<FieldError>> {
        let Some(book_id) = form
            .book
            .parse::<i32>()
            .ok()
            .filter(|id| books.iter().any(|book| book.id == *id))
        else {
            return Err(vec![FieldError::new("book", "Book does not exist.", form.book.clone())]);
        };

        let status = if form.status.is_empty() {
            CopyStatus::default()
        } else {
            form.status
                .parse()
                .map_err(|_| vec![FieldError::new("status", "Invalid status", form.status.clone())])?
        };

        Ok(BookInstanceFields {
            book_id,
            imprint: form.imprint.clone(),
            status,
            due_back: optional_date(&form.due_back),
        })
    }

    async fn insert(&self, store: &dyn CatalogStore, fields: &BookInstanceFields) -> AppResult<BookInstance> {
        store.book_instances_create(fields).await
    }

    async fn update(
        &self,
        store: &dyn CatalogStore,
        id: i32,
        fields: &BookInstanceFields,
    ) -> AppResult<Option<BookInstance>> {
        store.book_instances_update(id, fields).await
    }

    async fn remove(&self, store: &dyn CatalogStore, id: i32) -> AppResult<bool> {
        store.book_instances_delete(id).await
    }
}
