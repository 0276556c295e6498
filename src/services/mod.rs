//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod workflow;

use std::sync::Arc;

use crate::repository::CatalogStore;

pub use workflow::{Entity, Workflow};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: Workflow<authors::Authors>,
    pub books: Workflow<books::Books>,
    pub genres: Workflow<genres::Genres>,
    pub book_instances: Workflow<book_instances::BookInstances>,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store.clone()),
            authors: Workflow::new(store.clone(), authors::Authors),
            books: Workflow::new(store.clone(), books::Books),
            genres: Workflow::new(store.clone(), genres::Genres),
            book_instances: Workflow::new(store, book_instances::BookInstances),
        }
    }
}
