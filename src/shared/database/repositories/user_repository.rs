use sqlx::{PgPool, Row};
use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::domains::auth::models::User;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Get user by API key (for request authentication)
    pub async fn get_user_by_api_key(&self, api_key: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT wallet_id, name, email, password_hash, api_key, created_at, updated_at
            FROM users
            WHERE api_key = $1
            "#,
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by api key")?;

        let row = match row {
            Some(r) => r,
            None => return Ok(None),
        };

        Ok(Some(User {
            wallet_id: row.get("wallet_id"),
            name: row.get("name"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            api_key: row.get("api_key"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    // Get user by email (for registration and login)
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT wallet_id, name, email, password_hash, api_key, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email")?;

        let row = match row {
            Some(r) => r,
            None => return Ok(None),
        };

        Ok(Some(User {
            wallet_id: row.get("wallet_id"),
            name: row.get("name"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            api_key: row.get("api_key"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }))
    }

    // Replace the user's bearer credential
    pub async fn update_api_key(&self, wallet_id: Uuid, api_key: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET api_key = $1, updated_at = $2
            WHERE wallet_id = $3
            "#,
        )
        .bind(api_key)
        .bind(Utc::now())
        .bind(wallet_id)
        .execute(&self.pool)
        .await
        .context("Failed to update api key")?;

        Ok(())
    }

    // Delete user; account and transactions cascade via foreign keys
    pub async fn delete_user(&self, wallet_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE wallet_id = $1")
            .bind(wallet_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete user")?;

        Ok(())
    }
}
