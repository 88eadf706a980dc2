use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domains::auth::models::UserResponse;

// Registration request model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = RegisterRequest)]
pub struct RegisterRequest {
    /// Email address (must be unique)
    #[schema(example = "user@example.com")]
    pub email: String,

    /// Password (will be hashed)
    #[schema(example = "password123")]
    pub password: String,

    /// Display name (optional)
    #[schema(example = "johndoe")]
    pub name: Option<String>,
}

// Registration response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = RegisterResponse)]
pub struct RegisterResponse {
    /// Created user, including the generated API key
    pub user: UserResponse,

    /// Success message
    pub message: String,
}

// Login request model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = LoginRequest)]
pub struct LoginRequest {
    /// Email address
    #[schema(example = "user@example.com")]
    pub email: String,

    /// Password
    #[schema(example = "password123")]
    pub password: String,
}

// Login response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = LoginResponse)]
pub struct LoginResponse {
    /// User information, including the current API key
    pub user: UserResponse,

    /// Success message
    pub message: String,
}

// API key rotation response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = RotateKeyResponse)]
pub struct RotateKeyResponse {
    /// Newly issued API key; the previous one is no longer valid
    pub api_key: Uuid,

    /// Success message
    pub message: String,
}
