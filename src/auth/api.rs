//! Authentication Endpoints
//! Mission: Register and login handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::auth::models::Credentials;
use crate::auth::service::UserService;
use crate::error::ApiError;
use crate::response::ApiResponse;

/// Shared auth state.
#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<UserService>,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AuthState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Response {
    let Json(creds) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::BadRequest(rejection.body_text()).into_response(),
    };

    match state.users.register(creds) {
        Ok(user) => (
            StatusCode::CREATED,
            Json(ApiResponse {
                status_code: StatusCode::CREATED.as_u16(),
                message: "registrasi user berhasil".to_string(),
                data: user,
            }),
        )
            .into_response(),
        Err(e) => ApiError::BadRequest(e.to_string()).into_response(),
    }
}

/// POST /auth/login — returns the session token and sets a plain
/// `username` cookie.
pub async fn login(
    State(state): State<AuthState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Response {
    let Json(creds) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::BadRequest(rejection.body_text()).into_response(),
    };

    match state.users.login(creds) {
        Ok(user) => {
            let cookie = HeaderValue::from_str(&format!("username={}", user.username)).ok();

            let mut res = (
                StatusCode::OK,
                Json(ApiResponse {
                    status_code: StatusCode::OK.as_u16(),
                    message: "login berhasil".to_string(),
                    data: user,
                }),
            )
                .into_response();

            if let Some(cookie) = cookie {
                res.headers_mut().insert(header::SET_COOKIE, cookie);
            }

            res
        }
        Err(e) => ApiError::BadRequest(e.to_string()).into_response(),
    }
}
