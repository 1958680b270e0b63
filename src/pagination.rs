//! Pagination Engine
//! Mission: Slice a full result set into pages and report the page count

use serde::Deserialize;
use std::fmt;
use std::num::ParseIntError;

/// Raw `page`/`limit` query parameters. Kept as strings so a malformed
/// value surfaces the parser's own message instead of a silent default.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    /// Requested page, defaulting to 1 when unspecified.
    pub fn page(&self) -> Result<usize, ParseIntError> {
        Ok(self
            .page
            .as_deref()
            .map(|raw| raw.parse::<usize>())
            .transpose()?
            .unwrap_or(1))
    }

    /// Requested page size, defaulting to 10 when unspecified.
    pub fn limit(&self) -> Result<usize, ParseIntError> {
        Ok(self
            .limit
            .as_deref()
            .map(|raw| raw.parse::<usize>())
            .transpose()?
            .unwrap_or(10))
    }
}

/// Paging failure. A request past the last page is the only way this
/// arithmetic can refuse; an empty set makes every page out of range.
#[derive(Debug, PartialEq, Eq)]
pub enum PageError {
    OutOfRange,
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::OutOfRange => write!(f, "page sudah melebihi total page"),
        }
    }
}

impl std::error::Error for PageError {}

/// Slices `items` to the requested page and returns it with the total page
/// count, `ceil(len / limit)`.
///
/// Callers guarantee `page` and `limit` are at least 1 (defaults page=1,
/// limit=10 are applied at the handler); a zero limit is treated as out of
/// range rather than a divide-by-zero.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Result<(Vec<T>, usize), PageError> {
    if limit == 0 {
        return Err(PageError::OutOfRange);
    }

    let total_pages = items.len().div_ceil(limit);
    if page > total_pages {
        return Err(PageError::OutOfRange);
    }

    let start = (page - 1) * limit;
    let slice = items.into_iter().skip(start).take(limit).collect();

    Ok((slice, total_pages))
}
