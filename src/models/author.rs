//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::format_date;

/// Canonical location of an author's detail page
pub fn author_url(id: i32) -> String {
    format!("/catalog/author/{}", id)
}

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, "family_name, first_name"
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        author_url(self.id)
    }

    /// Birth and death dates as "Jan 1, 1900 - Feb 2, 1980"; unknown ends are left blank.
    pub fn lifespan(&self) -> String {
        let birth = self.date_of_birth.map(format_date).unwrap_or_default();
        let death = self.date_of_death.map(format_date).unwrap_or_default();
        if birth.is_empty() && death.is_empty() {
            return String::new();
        }
        format!("{} - {}", birth, death)
    }
}

/// Author with its display forms, as shown on list and detail pages
#[derive(Debug, Clone, Serialize)]
pub struct AuthorSummary {
    #[serde(flatten)]
    pub author: Author,
    pub name: String,
    pub lifespan: String,
    pub url: String,
}

impl From<&Author> for AuthorSummary {
    fn from(author: &Author) -> Self {
        Self {
            author: author.clone(),
            name: author.name(),
            lifespan: author.lifespan(),
            url: author.url(),
        }
    }
}

/// Validated author values, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorFields {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Author form values as displayed to the operator
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuthorForm {
    pub id: Option<i32>,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            id: Some(author.id),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth.map(|d| d.to_string()).unwrap_or_default(),
            date_of_death: author.date_of_death.map(|d| d.to_string()).unwrap_or_default(),
        }
    }
}
