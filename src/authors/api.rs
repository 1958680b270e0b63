//! Author Endpoints
//! Mission: CRUD handlers over authors behind the auth gate

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::app::CatalogState;
use crate::authors::models::{CreateAuthor, UpdateAuthor};
use crate::authors::service::AuthorError;
use crate::error::ApiError;
use crate::pagination::ListQuery;
use crate::response::{ApiResponse, ListResponse, Pagination};

/// POST /authors
pub async fn create_author(
    State(state): State<CatalogState>,
    payload: Result<Json<CreateAuthor>, JsonRejection>,
) -> Response {
    let Json(author) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::BadRequest(rejection.body_text()).into_response(),
    };

    match state.authors.create(&author) {
        Ok(()) => (
            StatusCode::CREATED,
            Json(ApiResponse {
                status_code: StatusCode::CREATED.as_u16(),
                message: "Berhasil menyimpan data author".to_string(),
                data: author,
            }),
        )
            .into_response(),
        Err(e) => ApiError::BadRequest(e.to_string()).into_response(),
    }
}

/// GET /authors?page=&limit=
pub async fn list_authors(
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

    match state.authors.find_all(page, limit) {
        Ok((authors, total_pages)) => (
            StatusCode::OK,
            Json(ListResponse {
                status_code: StatusCode::OK.as_u16(),
                message: "Berhasil mengambil data list author".to_string(),
                pagination: Pagination {
                    current_page: page,
                    total_page: total_pages,
                    limit,
                },
                data: authors,
            }),
        )
            .into_response(),
        // "No data" is an OK answer for a list, not a failure.
        Err(AuthorError::EmptyCollection) => (
            StatusCode::OK,
            Json(ApiResponse {
                status_code: StatusCode::OK.as_u16(),
                message: "Data author kosong".to_string(),
                data: serde_json::Value::Null,
            }),
        )
            .into_response(),
        Err(e) => ApiError::BadRequest(e.to_string()).into_response(),
    }
}

/// GET /authors/:id
pub async fn get_author(State(state): State<CatalogState>, Path(id): Path<String>) -> Response {
    let id = match id.parse::<i64>() {
        Ok(id) => id,
        Err(e) => return ApiError::Internal(e.to_string()).into_response(),
    };

    match state.authors.find_by_id(id) {
        Ok(author) => (
            StatusCode::OK,
            Json(ApiResponse {
                status_code: StatusCode::OK.as_u16(),
                message: "Berhasil mengambil data author".to_string(),
                data: author,
            }),
        )
            .into_response(),
        Err(e) => ApiError::BadRequest(e.to_string()).into_response(),
    }
}

/// PUT /authors/:id
pub async fn update_author(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateAuthor>, JsonRejection>,
) -> Response {
    let id = match id.parse::<i64>() {
        Ok(id) => id,
        Err(e) => return ApiError::Internal(e.to_string()).into_response(),
    };

    let Json(update) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::BadRequest(rejection.body_text()).into_response(),
    };

    match state.authors.update_by_id(id, &update) {
        Ok(author) => (
            StatusCode::OK,
            Json(ApiResponse {
                status_code: StatusCode::OK.as_u16(),
                message: "Berhasil mengupdate data author".to_string(),
                data: author,
            }),
        )
            .into_response(),
        Err(e) => ApiError::BadRequest(e.to_string()).into_response(),
    }
}

/// DELETE /authors/:id — answers with the deleted entity.
pub async fn delete_author(State(state): State<CatalogState>, Path(id): Path<String>) -> Response {
    let id = match id.parse::<i64>() {
        Ok(id) => id,
        Err(e) => return ApiError::Internal(e.to_string()).into_response(),
    };

    match state.authors.delete_by_id(id) {
        Ok(author) => (
            StatusCode::OK,
            Json(ApiResponse {
                status_code: StatusCode::OK.as_u16(),
                message: "Berhasil menghapus data author".to_string(),
                data: author,
            }),
        )
            .into_response(),
        Err(e) => ApiError::BadRequest(e.to_string()).into_response(),
    }
}
