//! Application Assembly
//! Mission: Configuration and router wiring, shared by the binary and tests

use anyhow::Result;
use axum::{
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::env;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::auth::{
    api as auth_api, auth_gate, AuthGate, AuthState, JwtTokenService, SqliteUserRepository,
    TokenService, UserService,
};
use crate::authors::{api as authors_api, AuthorService, SqliteAuthorRepository};
use crate::books::{api as books_api, BookService, SqliteBookRepository};
use crate::middleware::request_logging;

/// Process configuration, read once at startup.
pub struct AppConfig {
    pub db_path: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub verify_integrity: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let db_path = env::var("DB_PATH").unwrap_or_else(|_| "library.db".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "dev-secret-change-in-production-minimum-32-characters".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let verify_integrity = env::var("INTEGRITY_CHECK")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(true);

        Self {
            db_path,
            jwt_secret,
            bind_addr,
            verify_integrity,
        }
    }
}

/// Shared state of the protected catalog routes.
#[derive(Clone)]
pub struct CatalogState {
    pub authors: Arc<AuthorService>,
    pub books: Arc<BookService>,
}

/// Build the full application router against the configured database.
pub fn build_app(config: &AppConfig) -> Result<Router> {
    let user_repo = Arc::new(SqliteUserRepository::new(&config.db_path)?);
    let author_repo = Arc::new(SqliteAuthorRepository::new(&config.db_path)?);
    let book_repo = Arc::new(SqliteBookRepository::new(&config.db_path)?);

    let tokens: Arc<dyn TokenService> =
        Arc::new(JwtTokenService::new(config.jwt_secret.clone()));

    let auth_state = AuthState {
        users: Arc::new(UserService::new(user_repo, tokens.clone())),
    };

    let catalog_state = CatalogState {
        authors: Arc::new(AuthorService::new(author_repo)),
        books: Arc::new(BookService::new(book_repo)),
    };

    let gate = AuthGate {
        tokens,
        verify_integrity: config.verify_integrity,
    };

    let auth_routes = Router::new()
        .route("/auth/register", post(auth_api::register))
        .route("/auth/login", post(auth_api::login))
        .with_state(auth_state);

    let protected_routes = Router::new()
        .route(
            "/authors",
            post(authors_api::create_author).get(authors_api::list_authors),
        )
        .route(
            "/authors/:id",
            get(authors_api::get_author)
                .put(authors_api::update_author)
                .delete(authors_api::delete_author),
        )
        .route(
            "/books",
            post(books_api::create_book).get(books_api::list_books),
        )
        .route(
            "/books/:id",
            get(books_api::get_book)
                .put(books_api::update_book)
                .delete(books_api::delete_book),
        )
        .route_layer(middleware::from_fn_with_state(gate, auth_gate))
        .with_state(catalog_state);

    let public_routes = Router::new().route("/health", get(health_check));

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive());

    Ok(app)
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
