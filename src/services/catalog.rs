//! Catalog home page

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::CopyStatus,
    repository::CatalogStore,
    views::{Outcome, View},
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Cheapest round trip to the store
    pub async fn ping(&self) -> AppResult<()> {
        self.store.genres_count().await?;
        Ok(())
    }

    /// Record counts for the home page, fetched in parallel
    pub async fn index(&self) -> AppResult<Outcome> {
        let store = self.store.as_ref();
        let (books, copies, available, authors, genres) = tokio::try_join!(
            store.books_count(),
            store.book_instances_count(None),
            store.book_instances_count(Some(CopyStatus::Available)),
            store.authors_count(),
            store.genres_count(),
        )?;

        let view = View::new("index", "Local Library Home")
            .with("book_count", &books)?
            .with("book_instance_count", &copies)?
            .with("book_instance_available_count", &available)?
            .with("author_count", &authors)?
            .with("genre_count", &genres)?;
        Ok(Outcome::Render(view))
    }
}
