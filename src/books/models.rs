//! Book request and response payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// POST /books and PUT /books/:id body. Updates are full replacements;
/// every field is required by validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub author_id: i64,
}

/// Denormalized author carried inside book read responses.
#[derive(Debug, Clone, Serialize)]
pub struct BookAuthor {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
}

/// Book read model as served by the join-based read paths.
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub author: BookAuthor,
}
