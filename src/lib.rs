//! Library Catalog API
//!
//! Exposes the application modules for the binary and the black-box tests.

pub mod app;
pub mod auth;
pub mod authors;
pub mod books;
pub mod error;
pub mod middleware;
pub mod pagination;
pub mod response;
