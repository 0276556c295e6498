//! Local Library catalog server
//!
//! A server-rendered catalog of authors, books, genres and physical book
//! copies, with validated create/update forms and guarded deletion.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub renderer: Arc<dyn views::Renderer>,
}

impl AppState {
    /// State over `store`, rendering views as JSON
    pub fn new(config: AppConfig, store: Arc<dyn repository::CatalogStore>) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(store)),
            renderer: Arc::new(views::JsonRenderer),
        }
    }
}
