//! Author workflow configuration

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::workflow::{Dependents, Entity};
use crate::{
    error::AppResult,
    models::{
        author::{author_url, Author, AuthorFields, AuthorForm, AuthorSummary},
        book::BookBrief,
    },
    repository::CatalogStore,
    validation::{optional_date, FieldError, FieldSpec, Rule, Sanitized, Schema},
};

static AUTHOR_SCHEMA: Schema = Schema::new(&[
    FieldSpec::required(
        "first_name",
        &[
            Rule::MinLength(1, "First name must be specified."),
            Rule::MaxLength(100, "First name must contain at most 100 characters"),
            Rule::Alphanumeric("First name has non-alphanumeric characters."),
        ],
    ),
    FieldSpec::required(
        "family_name",
        &[
            Rule::MinLength(1, "Family name must be specified."),
            Rule::MaxLength(100, "Family name must contain at most 100 characters"),
            Rule::Alphanumeric("Family name has non-alphanumeric characters."),
        ],
    ),
    FieldSpec::optional("date_of_birth", &[Rule::IsoDate("Invalid date of birth")]),
    FieldSpec::optional("date_of_death", &[Rule::IsoDate("Invalid date of death")]),
]);

/// Authors; deletion is blocked while any book names the author
#[derive(Debug, Clone, Copy, Default)]
pub struct Authors;

#[async_trait]
impl Entity for Authors {
    type Record = Author;
    type Listing = AuthorSummary;
    type Detail = AuthorSummary;
    type Dependent = BookBrief;
    type References = ();
    type Form = AuthorForm;
    type Fields = AuthorFields;

    const KEY: &'static str = "author";
    const LABEL: &'static str = "Author";
    const LIST_TITLE: &'static str = "Author List";
    const LIST_PATH: &'static str = "/catalog/authors";
    const DELETE_FIELD: &'static str = "authorid";
    const DEPENDENTS: Option<Dependents> = Some(Dependents {
        key: "author_books",
        label: "books",
    });

    fn schema(&self) -> &'static Schema {
        &AUTHOR_SCHEMA
    }

    fn detail_url(&self, id: i32) -> String {
        author_url(id)
    }

    fn record_id(&self, record: &Author) -> i32 {
        record.id
    }

    async fn list(&self, store: &dyn CatalogStore) -> AppResult<Vec<AuthorSummary>> {
        let authors = store.authors_list().await?;
        Ok(authors.iter().map(AuthorSummary::from).collect())
    }

    async fn find(&self, store: &dyn CatalogStore, id: i32) -> AppResult<Option<Author>> {
        store.authors_get_by_id(id).await
    }

    async fn dependents(&self, store: &dyn CatalogStore, id: i32) -> AppResult<Vec<BookBrief>> {
        let books = store.books_by_author(id).await?;
        Ok(books.iter().map(BookBrief::from).collect())
    }

    async fn resolve(&self, _store: &dyn CatalogStore, record: Author) -> AppResult<AuthorSummary> {
        Ok(AuthorSummary::from(&record))
    }

    fn detail_title(&self, _detail: &AuthorSummary) -> String {
        "Author Detail".to_string()
    }

    async fn references(&self, _store: &dyn CatalogStore) -> AppResult<()> {
        Ok(())
    }

    fn form_context(&self, _references: &(), _form: &AuthorForm) -> AppResult<Map<String, Value>> {
        Ok(Map::new())
    }

    fn form_from_record(&self, record: &Author) -> AuthorForm {
        AuthorForm::from(record)
    }

    fn candidate(&self, id: Option<i32>, values: &Sanitized) -> AuthorForm {
        AuthorForm {
            id,
            first_name: values.text("first_name").to_string(),
            family_name: values.text("family_name").to_string(),
            date_of_birth: values.text("date_of_birth").to_string(),
            date_of_death: values.text("date_of_death").to_string(),
        }
    }

    fn fields(&self, form: &AuthorForm, _references: &()) -> Result<AuthorFields, Vec<FieldError>> {
        Ok(AuthorFields {
            first_name: form.first_name.clone(),
            family_name: form.family_name.clone(),
            date_of_birth: optional_date(&form.date_of_birth),
            date_of_death: optional_date(&form.date_of_death),
        })
    }

    async fn insert(&self, store: &dyn CatalogStore, fields: &AuthorFields) -> AppResult<Author> {
        store.authors_create(fields).await
    }

    async fn update(&self, store: &dyn CatalogStore, id: i32, fields: &AuthorFields) -> AppResult<Option<Author>> {
        store.authors_update(id, fields).await
    }

    async fn remove(&self, store: &dyn CatalogStore, id: i32) -> AppResult<bool> {
        store.authors_delete(id).await
    }
}
