//! Response Envelopes
//! Mission: Keep every endpoint answering in the same JSON shape

use serde::Serialize;

/// Envelope for single-item and message-only responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub message: String,
    pub data: T,
}

/// Envelope for paginated list responses.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub status_code: u16,
    pub message: String,
    pub pagination: Pagination,
    pub data: T,
}

/// Page metadata computed per list request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: usize,
    pub total_page: usize,
    pub limit: usize,
}

/// Envelope for failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status_code: u16,
    pub error: String,
}
