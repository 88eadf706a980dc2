use sqlx::{PgPool, Row};
use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::domains::transactions::models::Account;

pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Get account by wallet id
    pub async fn get_account(&self, wallet_id: Uuid) -> Result<Option<Account>> {
        let row = sqlx::query(
            r#"
            SELECT wallet_id, usd_balance, bitcoin, ethereum, litecoin, ripple,
                   other_crypto, updated_at
            FROM accounts
            WHERE wallet_id = $1
            "#,
        )
        .bind(wallet_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch account")?;

        let row = match row {
            Some(r) => r,
            None => return Ok(None),
        };

        Ok(Some(Account {
            wallet_id: row.get("wallet_id"),
            usd_balance: row.get("usd_balance"),
            bitcoin: row.get("bitcoin"),
            ethereum: row.get("ethereum"),
            litecoin: row.get("litecoin"),
            ripple: row.get("ripple"),
            other_crypto: row.get("other_crypto"),
            updated_at: row.get("updated_at"),
        }))
    }

    // Overwrite all balances for the wallet
    pub async fn update_account(&self, account: &Account) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET usd_balance = $1, bitcoin = $2, ethereum = $3, litecoin = $4,
                ripple = $5, other_crypto = $6, updated_at = $7
            WHERE wallet_id = $8
            "#,
        )
        .bind(account.usd_balance)
        .bind(account.bitcoin)
        .bind(account.ethereum)
        .bind(account.litecoin)
        .bind(account.ripple)
        .bind(account.other_crypto)
        .bind(Utc::now())
        .bind(account.wallet_id)
        .execute(&self.pool)
        .await
        .context("Failed to update account")?;

        Ok(())
    }
}
