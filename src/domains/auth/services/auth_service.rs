use std::sync::Arc;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use uuid::Uuid;

use crate::domains::auth::models::{RegisterRequest, User};
use crate::domains::transactions::models::Account;
use crate::shared::cache::CacheStore;
use crate::shared::database::LedgerStore;
use crate::shared::errors::AuthError;

/// AuthService: registration, login and credential lifecycle.
///
/// Passwords are only ever stored as argon2 hashes and compared through hash
/// verification, never as plaintext. The user and its zero-balance account
/// are created in one durable unit.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn LedgerStore>,
    cache: Arc<dyn CacheStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn LedgerStore>, cache: Arc<dyn CacheStore>) -> Self {
        Self { store, cache }
    }

    /// Register a new user. The wallet identifier and API key are generated
    /// here; all balances start at zero.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        // 1. Email must be unique
        let existing = self
            .store
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to check email existence: {}", e)))?;

        if existing.is_some() {
            return Err(AuthError::EmailAlreadyExists {
                email: request.email,
            });
        }

        // 2. Hash the password
        let password_hash = Self::hash_password(&request.password)?;

        // 3. Create user + account atomically
        let now = Utc::now();
        let user = User {
            wallet_id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            password_hash,
            api_key: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        };
        let account = Account::new(user.wallet_id);

        self.store
            .insert_user(&user, &account)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to create user: {}", e)))?;

        tracing::info!("Registered user {} (wallet {})", user.email, user.wallet_id);
        Ok(user)
    }

    /// Verify email + password and return the user (including the current
    /// API key).
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .store
            .get_user_by_email(email)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {}", e)))?;

        let user = match user {
            Some(u) => u,
            None => return Err(AuthError::InvalidCredentials),
        };

        Self::verify_password(password, &user.password_hash)?;

        Ok(user)
    }

    /// Issue a fresh API key, invalidating every cache entry keyed by the old
    /// one so the stale credential stops resolving immediately.
    pub async fn rotate_api_key(&self, api_key: &str) -> Result<Uuid, AuthError> {
        let user = self.require_user(api_key).await?;

        let new_key = Uuid::new_v4();
        self.store
            .update_api_key(user.wallet_id, new_key)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to rotate api key: {}", e)))?;

        self.invalidate_user_entries(api_key, user.wallet_id).await;

        tracing::info!("Rotated api key for wallet {}", user.wallet_id);
        Ok(new_key)
    }

    /// Close the account: deletes the user, and with it the account and the
    /// transaction history (durable-store cascade).
    pub async fn close_account(&self, api_key: &str) -> Result<(), AuthError> {
        let user = self.require_user(api_key).await?;

        self.store
            .delete_user(user.wallet_id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to delete user: {}", e)))?;

        self.invalidate_user_entries(api_key, user.wallet_id).await;

        tracing::info!("Closed account for wallet {}", user.wallet_id);
        Ok(())
    }

    async fn require_user(&self, api_key: &str) -> Result<User, AuthError> {
        self.store
            .get_user_by_api_key(api_key)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .ok_or(AuthError::InvalidApiKey)
    }

    // Drop the credential, wallet and history cache entries for this user.
    // Best effort: a failed delete only means a spurious later miss.
    async fn invalidate_user_entries(&self, api_key: &str, wallet_id: Uuid) {
        for key in [
            api_key.to_string(),
            wallet_id.to_string(),
            format!("{}:{}", api_key, wallet_id),
        ] {
            if let Err(e) = self.cache.delete(&key).await {
                tracing::warn!("Cache invalidation failed for key {}: {}", key, e);
            }
        }
    }

    fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHashingFailed(format!("Failed to hash password: {}", e)))?
            .to_string();

        Ok(password_hash)
    }

    fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
        let parsed_hash =
            PasswordHash::new(password_hash).map_err(|_| AuthError::InvalidCredentials)?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = AuthService::hash_password("password123").unwrap();
        assert_ne!(hash, "password123");
        assert!(AuthService::verify_password("password123", &hash).is_ok());
        assert!(matches!(
            AuthService::verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
