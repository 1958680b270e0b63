//! Book catalog module.

pub mod api;
pub mod models;
pub mod repository;
pub mod service;

pub use repository::SqliteBookRepository;
pub use service::BookService;
