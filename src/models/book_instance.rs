//! Book instance (physical copy) model and related types

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{book::Book, format_date};

pub fn book_instance_url(id: i32) -> String {
    format!("/catalog/bookinstance/{}", id)
}

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "copy_status")]
pub enum CopyStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl CopyStatus {
    pub const ALL: [CopyStatus; 4] = [
        CopyStatus::Available,
        CopyStatus::Maintenance,
        CopyStatus::Loaned,
        CopyStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CopyStatus::Available => "Available",
            CopyStatus::Maintenance => "Maintenance",
            CopyStatus::Loaned => "Loaned",
            CopyStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CopyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CopyStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown copy status: {}", s))
    }
}

/// Full book instance model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: i32,
    pub book_id: i32,
    /// Publisher and edition details of this copy
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back.map(format_date).unwrap_or_default()
    }
}

/// Instance list row with its book title resolved
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceListing {
    #[serde(flatten)]
    pub instance: BookInstance,
    pub url: String,
    pub due_back_formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
}

impl BookInstanceListing {
    pub fn new(instance: &BookInstance, book: Option<&Book>) -> Self {
        Self {
            instance: instance.clone(),
            url: instance.url(),
            due_back_formatted: instance.due_back_formatted(),
            book_title: book.map(|b| b.title.clone()),
        }
    }
}

/// Instance with its book resolved
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceDetail {
    #[serde(flatten)]
    pub instance: BookInstance,
    pub url: String,
    pub due_back_formatted: String,
    pub book: Option<Book>,
}

/// Validated instance values, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct BookInstanceFields {
    pub book_id: i32,
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: Option<NaiveDate>,
}

/// Instance form values as displayed to the operator
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookInstanceForm {
    pub id: Option<i32>,
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            id: Some(instance.id),
            book: instance.book_id.to_string(),
            imprint: instance.imprint.clone(),
            status: instance.status.to_string(),
            due_back: instance.due_back.map(|d| d.to_string()).unwrap_or_default(),
        }
    }
}
