//! Auth Gate
//! Mission: Protect catalog routes with token and body-integrity checks

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::auth::models::Claims;
use crate::auth::token::TokenService;

/// Request-scoped header carrying the body digest.
const REQUEST_HASH_HEADER: &str = "x-request-hash";

/// Shared gate state: the token verifier and whether the body-integrity
/// check is enabled (both design variants are supported).
#[derive(Clone)]
pub struct AuthGate {
    pub tokens: Arc<dyn TokenService>,
    pub verify_integrity: bool,
}

/// Gate for protected routes. Terminal at the first failure:
/// bearer extraction, token verification, optional body digest, then the
/// decoded claim is attached to the request for downstream handlers.
pub async fn auth_gate(
    State(gate): State<AuthGate>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    // The bearer scheme prefix ("Bearer ") is 7 characters; anything
    // shorter cannot carry a credential.
    if header_value.len() < 7 {
        return Err(AuthError::AuthorizationRequired);
    }

    let token = header_value[7..].to_string();

    let claims = gate
        .tokens
        .verify(&token)
        .map_err(|_| AuthError::InvalidToken)?;

    let mut req = if gate.verify_integrity {
        check_integrity(req, &token).await?
    } else {
        req
    };

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Digest the raw body (or the token when the body is empty), attach it as
/// a request header, and compare the header against the digest. The
/// buffered body is restored so handlers can still read it.
///
/// Both sides of the comparison are computed from the same bytes inside
/// this request, so the check cannot catch third-party tampering; it is an
/// extensibility point kept for compatibility.
async fn check_integrity(req: Request, token: &str) -> Result<Request, AuthError> {
    let (mut parts, body) = req.into_parts();

    let body_bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| AuthError::IntegrityFailed)?;

    let computed = if body_bytes.is_empty() {
        compute_hash(token.as_bytes())
    } else {
        compute_hash(&body_bytes)
    };

    let value =
        HeaderValue::from_str(&computed).map_err(|_| AuthError::IntegrityFailed)?;
    parts.headers.insert(REQUEST_HASH_HEADER, value);

    let echoed = parts
        .headers
        .get(REQUEST_HASH_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if echoed != computed {
        return Err(AuthError::IntegrityFailed);
    }

    Ok(Request::from_parts(parts, Body::from(body_bytes)))
}

fn compute_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Extract claims from a request (use after the gate).
pub fn extract_claims(req: &Request) -> Option<&Claims> {
    req.extensions().get::<Claims>()
}

/// Gate failures.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    AuthorizationRequired,
    InvalidToken,
    IntegrityFailed,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::AuthorizationRequired => {
                (StatusCode::UNAUTHORIZED, "authorization required")
            }
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid token"),
            AuthError::IntegrityFailed => {
                (StatusCode::BAD_REQUEST, "data integrity validation failed")
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
