use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;

/// Authentication and user-lifecycle errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email already registered
    #[error("Email already exists: {email}")]
    EmailAlreadyExists { email: String },

    /// Wrong email or password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// API key does not resolve to a user
    #[error("Invalid or missing API key")]
    InvalidApiKey,

    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    PasswordHashingFailed(String),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<AuthError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::EmailAlreadyExists { .. } => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            AuthError::PasswordHashingFailed(_) | AuthError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
