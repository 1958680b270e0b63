//! User Service
//! Mission: Registration and login business rules

use std::fmt;
use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::{info, warn};

use crate::auth::models::{Credentials, LoggedInUser, RegisteredUser};
use crate::auth::token::TokenService;
use crate::auth::user_store::UserRepository;

/// Registration/login failures. Display strings are the user-facing
/// messages; the handler wraps them in the error envelope.
#[derive(Debug)]
pub enum UserError {
    MissingCredentials,
    UsernameTooShort,
    UsernameTooLong,
    UsernameTaken,
    PasswordTooShort,
    WrongCredentials,
    Internal(String),
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserError::MissingCredentials => write!(f, "username dan password wajib diisi"),
            UserError::UsernameTooShort => write!(f, "username minimal 5 karakter"),
            UserError::UsernameTooLong => write!(f, "username maksimal 20 karakter"),
            UserError::UsernameTaken => write!(f, "username sudah digunakan oleh user lain"),
            UserError::PasswordTooShort => {
                write!(f, "harap masukkan password minimal 8 karakter")
            }
            // One generic message for unknown username and digest mismatch,
            // so usernames cannot be enumerated through login.
            UserError::WrongCredentials => write!(f, "username atau password salah"),
            UserError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for UserError {}

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { repo, tokens }
    }

    /// Register a new user. Checks run in fixed order, first violation
    /// wins; the uniqueness lookup runs before the password-length check.
    pub fn register(&self, creds: Credentials) -> Result<RegisteredUser, UserError> {
        if creds.username.is_empty() || creds.password.is_empty() {
            return Err(UserError::MissingCredentials);
        }

        if creds.username.len() < 5 {
            return Err(UserError::UsernameTooShort);
        }

        if creds.username.len() > 20 {
            return Err(UserError::UsernameTooLong);
        }

        let taken = self
            .repo
            .username_taken(&creds.username)
            .map_err(|e| UserError::Internal(e.to_string()))?;
        if taken {
            return Err(UserError::UsernameTaken);
        }

        if creds.password.len() < 8 {
            return Err(UserError::PasswordTooShort);
        }

        let digest =
            hash(&creds.password, DEFAULT_COST).map_err(|e| UserError::Internal(e.to_string()))?;

        self.repo
            .save(&creds.username, &digest)
            .map_err(|e| UserError::Internal(e.to_string()))?;

        info!("✅ Registered user: {}", creds.username);

        Ok(RegisteredUser {
            username: creds.username,
        })
    }

    /// Verify credentials and issue a session token.
    pub fn login(&self, creds: Credentials) -> Result<LoggedInUser, UserError> {
        if creds.username.is_empty() || creds.password.is_empty() {
            return Err(UserError::MissingCredentials);
        }

        let user = self
            .repo
            .find_by_username(&creds.username)
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::WrongCredentials)?;

        let valid =
            verify(&creds.password, &user.password).map_err(|_| UserError::WrongCredentials)?;
        if !valid {
            warn!("❌ Failed login attempt: {}", creds.username);
            return Err(UserError::WrongCredentials);
        }

        let token = self
            .tokens
            .issue(&user.username)
            .map_err(|e| UserError::Internal(e.to_string()))?;

        info!("🔐 Login successful: {}", user.username);

        Ok(LoggedInUser {
            username: user.username,
            token,
        })
    }
}
