//! Author catalog module.

pub mod api;
pub mod models;
pub mod repository;
pub mod service;

pub use repository::SqliteAuthorRepository;
pub use service::AuthorService;
