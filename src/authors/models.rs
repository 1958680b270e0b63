//! Author request and response payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// POST /authors body. The birthdate arrives as a string and is validated
/// against the `YYYY-MM-DD` calendar format by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub birth_date: String,
}

/// PUT /authors/:id body. Either field may be omitted; an empty value
/// means "leave unchanged".
#[derive(Debug, Deserialize)]
pub struct UpdateAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub birth_date: String,
}

/// Author read model.
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
}

/// Update response payload: the row as persisted, birthdate in canonical
/// form.
#[derive(Debug, Serialize)]
pub struct UpdatedAuthor {
    pub name: String,
    pub birth_date: NaiveDate,
}
