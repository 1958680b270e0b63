//! Book Endpoints
//! Mission: CRUD handlers over books behind the auth gate

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::app::CatalogState;
use crate::books::models::BookPayload;
use crate::books::service::BookError;
use crate::error::ApiError;
use crate::pagination::ListQuery;
use crate::response::{ApiResponse, ListResponse, Pagination};

/// POST /books
pub async fn create_book(
    State(state): State<CatalogState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Response {
    let Json(book) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::BadRequest(rejection.body_text()).into_response(),
    };

    match state.books.create(&book) {
        Ok(()) => (
            StatusCode::CREATED,
            Json(ApiResponse {
                status_code: StatusCode::CREATED.as_u16(),
                message: "Berhasil menyimpan data book".to_string(),
                data: book,
            }),
        )
            .into_response(),
        Err(e) => ApiError::BadRequest(e.to_string()).into_response(),
    }
}

/// GET /books?page=&limit=
pub async fn list_books(
    State(state): State<CatalogState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let page = match query.page() {
        Ok(page) => page,
        Err(e) => return ApiError::Internal(e.to_string()).into_response(),
    };
    let limit = match query.limit() {
        Ok(limit) => limit,
        Err(e) => return ApiError::Internal(e.to_string()).into_response(),
    };

    match state.books.find_all(page, limit) {
        Ok((books, total_pages)) => (
            StatusCode::OK,
            Json(ListResponse {
                status_code: StatusCode::OK.as_u16(),
                message: "Data buku berhasil diambil".to_string(),
                pagination: Pagination {
                    current_page: page,
                    total_page: total_pages,
                    limit,
                },
                data: books,
            }),
        )
            .into_response(),
        Err(BookError::EmptyCollection) => (
            StatusCode::OK,
            Json(ApiResponse {
                status_code: StatusCode::OK.as_u16(),
                message: "Data book kosong".to_string(),
                data: serde_json::Value::Null,
            }),
        )
            .into_response(),
        Err(e) => ApiError::BadRequest(e.to_string()).into_response(),
    }
}

/// GET /books/:id
pub async fn get_book(State(state): State<CatalogState>, Path(id): Path<String>) -> Response {
    let id = match id.parse::<i64>() {
        Ok(id) => id,
        Err(e) => return ApiError::Internal(e.to_string()).into_response(),
    };

    match state.books.find_by_id(id) {
        Ok(book) => (
            StatusCode::OK,
            Json(ApiResponse {
                status_code: StatusCode::OK.as_u16(),
                message: "Data buku berhasil diambil".to_string(),
                data: book,
            }),
        )
            .into_response(),
        Err(e) => ApiError::BadRequest(e.to_string()).into_response(),
    }
}

/// PUT /books/:id
pub async fn update_book(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Response {
    let id = match id.parse::<i64>() {
        Ok(id) => id,
        Err(e) => return ApiError::Internal(e.to_string()).into_response(),
    };

    let Json(book) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::BadRequest(rejection.body_text()).into_response(),
    };

    match state.books.update_by_id(id, &book) {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse {
                status_code: StatusCode::OK.as_u16(),
                message: "Data buku berhasil diupdate".to_string(),
                data: book,
            }),
        )
            .into_response(),
        Err(e) => ApiError::BadRequest(e.to_string()).into_response(),
    }
}

/// DELETE /books/:id — answers with the deleted entity.
pub async fn delete_book(State(state): State<CatalogState>, Path(id): Path<String>) -> Response {
    let id = match id.parse::<i64>() {
        Ok(id) => id,
        Err(e) => return ApiError::Internal(e.to_string()).into_response(),
    };

    match state.books.delete_by_id(id) {
        Ok(book) => (
            StatusCode::OK,
            Json(ApiResponse {
                status_code: StatusCode::OK.as_u16(),
                message: "Data buku berhasil dihapus".to_string(),
                data: book,
            }),
        )
            .into_response(),
        Err(e) => ApiError::BadRequest(e.to_string()).into_response(),
    }
}
