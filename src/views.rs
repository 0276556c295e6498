//! Views produced by the catalog workflows and the renderer seam

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// A template name plus the data it is rendered with.
///
/// `data` is always a JSON object; its keys are fixed per view
/// (`title`, the primary record, related lists, `errors`, selection markers).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub name: String,
    pub data: Map<String, Value>,
}

impl View {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert("title".to_string(), Value::String(title.into()));
        Self {
            name: name.into(),
            data,
        }
    }

    /// Add a serializable value under `key`
    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> AppResult<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| AppError::Internal(format!("Cannot serialize view field {}: {}", key, e)))?;
        self.data.insert(key.to_string(), value);
        Ok(self)
    }

    /// Merge a map of already serialized values
    pub fn extend(mut self, values: Map<String, Value>) -> Self {
        self.data.extend(values);
        self
    }

    pub fn title(&self) -> &str {
        self.data.get("title").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

/// What a workflow operation asks the boundary to do
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(View),
    /// See Other to this location
    Redirect(String),
}

impl Outcome {
    pub fn redirect(location: impl Into<String>) -> Self {
        Outcome::Redirect(location.into())
    }
}

/// Turns a view into a response body
pub trait Renderer: Send + Sync {
    fn render(&self, view: View) -> AppResult<Response>;
}

/// Renders the view payload as JSON, tagged with the template name in the
/// `x-view` header and the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, view: View) -> AppResult<Response> {
        let name = view.name.clone();
        let mut response = Json(view).into_response();
        let value = header::HeaderValue::from_str(&name)
            .map_err(|e| AppError::Internal(format!("Invalid view name {}: {}", name, e)))?;
        response.headers_mut().insert("x-view", value);
        Ok(response)
    }
}
