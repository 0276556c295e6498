//! Genre workflow configuration

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::workflow::{Dependents, Entity};
use crate::{
    error::AppResult,
    models::{
        book::BookBrief,
        genre::{genre_url, Genre, GenreFields, GenreForm},
    },
    repository::CatalogStore,
    validation::{FieldError, FieldSpec, Rule, Sanitized, Schema},
};

static GENRE_SCHEMA: Schema = Schema::new(&[FieldSpec::required(
    "name",
    &[
        Rule::MinLength(3, "Genre name must contain at least 3 characters"),
        Rule::MaxLength(100, "Genre name must contain at most 100 characters"),
    ],
)]);

/// Genres; a genre still attached to a book cannot be deleted
#[derive(Debug, Clone, Copy, Default)]
pub struct Genres;

#[async_trait]
impl Entity for Genres {
    type Record = Genre;
    type Listing = Genre;
    type Detail = Genre;
    type Dependent = BookBrief;
    type References = ();
    type Form = GenreForm;
    type Fields = GenreFields;

    const KEY: &'static str = "genre";
    const LABEL: &'static str = "Genre";
    const LIST_TITLE: &'static str = "Genre List";
    const LIST_PATH: &'static str = "/catalog/genres";
    const DELETE_FIELD: &'static str = "genreid";
    const DEPENDENTS: Option<Dependents> = Some(Dependents {
        key: "genre_books",
        label: "books",
    });

    fn schema(&self) -> &'static Schema {
        &GENRE_SCHEMA
    }

    fn detail_url(&self, id: i32) -> String {
        genre_url(id)
    }

    fn record_id(&self, record: &Genre) -> i32 {
        record.id
    }

    async fn list(&self, store: &dyn CatalogStore) -> AppResult<Vec<Genre>> {
        store.genres_list().await
    }

    async fn find(&self, store: &dyn CatalogStore, id: i32) -> AppResult<Option<Genre>> {
        store.genres_get_by_id(id).await
    }

    async fn dependents(&self, store: &dyn CatalogStore, id: i32) -> AppResult<Vec<BookBrief>> {
        let books = store.books_by_genre(id).await?;
        Ok(books.iter().map(BookBrief::from).collect())
    }

    async fn resolve(&self, _store: &dyn CatalogStore, record: Genre) -> AppResult<Genre> {
        Ok(record)
    }

    fn detail_title(&self, _detail: &Genre) -> String {
        "Genre Detail".to_string()
    }

    async fn references(&self, _store: &dyn CatalogStore) -> AppResult<()> {
        Ok(())
    }

    fn form_context(&self, _references: &(), _form: &GenreForm) -> AppResult<Map<String, Value>> {
        Ok(Map::new())
    }

    fn form_from_record(&self, record: &Genre) -> GenreForm {
        GenreForm::from(record)
    }

    fn candidate(&self, id: Option<i32>, values: &Sanitized) -> GenreForm {
        GenreForm {
            id,
            name: values.text("name").to_string(),
        }
    }

    fn fields(&self, form: &GenreForm, _references: &()) -> Result<GenreFields, Vec<FieldError>> {
        Ok(GenreFields {
            name: form.name.clone(),
        })
    }

    /// Genre names are unique, case-insensitively
    async fn duplicate_of(&self, store: &dyn CatalogStore, fields: &GenreFields) -> AppResult<Option<i32>> {
        let genres = store.genres_list().await?;
        Ok(genres
            .iter()
            .find(|genre| genre.name.to_lowercase() == fields.name.to_lowercase())
            .map(|genre| genre.id))
    }

    async fn insert(&self, store: &dyn CatalogStore, fields: &GenreFields) -> AppResult<Genre> {
        store.genres_create(fields).await
    }

    async fn update(&self, store: &dyn CatalogStore, id: i32, fields: &GenreFields) -> AppResult<Option<Genre>> {
        store.genres_update(id, fields).await
    }

    async fn remove(&self, store: &dyn CatalogStore, id: i32) -> AppResult<bool> {
        store.genres_delete(id).await
    }
}
