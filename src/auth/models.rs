//! Authentication Models
//! Mission: Define the session claim and credential payloads

use serde::{Deserialize, Serialize};

/// Identity payload carried inside a session token. Created at login,
/// expires after 24 hours, never persisted server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: usize,
}

/// Request body shared by register and login.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Register response payload. The password digest is never echoed.
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub username: String,
}

/// Login response payload.
#[derive(Debug, Serialize)]
pub struct LoggedInUser {
    pub username: String,
    pub token: String,
}
