use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User row as stored in the durable store and cached as JSON.
///
/// `wallet_id` is the primary key shared with the account; `api_key` is the
/// opaque bearer credential presented on every request. The password is only
/// ever held as an argon2 hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub wallet_id: Uuid,
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub api_key: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User as exposed over HTTP (no credential material).
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = UserResponse)]
pub struct UserResponse {
    /// Wallet identifier
    pub wallet_id: Uuid,

    /// Display name (optional)
    pub name: Option<String>,

    /// Email address
    pub email: String,

    /// Bearer credential for the X-Api-Key header
    pub api_key: Uuid,

    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            wallet_id: user.wallet_id,
            name: user.name,
            email: user.email,
            api_key: user.api_key,
            created_at: user.created_at,
        }
    }
}
