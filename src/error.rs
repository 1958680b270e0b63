//! Handler-boundary error type.
//!
//! Every failure that reaches the HTTP layer is converted here into the
//! uniform `{status_code, error}` envelope. Business and lookup failures are
//! uniformly 400; only malformed path/query parameters surface as 500 with
//! the raw parse message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::response::ErrorBody;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorBody {
            status_code: status.as_u16(),
            error: format!("error : {}", detail),
        });

        (status, body).into_response()
    }
}
