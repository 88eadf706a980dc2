// =====================================================
// Durable store adapter
// =====================================================
// The durable store is the sole owner of canonical state; everything the
// core needs from it is expressed by the LedgerStore trait so services
// depend on the interface, not on PostgreSQL.
//
// Implementations:
// - `PostgresStore`: production adapter over sqlx (this file)
// - `MemoryStore`: in-memory reference implementation (memory.rs)
// =====================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::auth::models::User;
use crate::domains::transactions::models::{Account, Transaction};
use crate::shared::database::repositories::{
    AccountRepository, TransactionRepository, UserRepository,
};

/// Durable persistence interface for users, accounts and the ledger.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Look up a user by bearer credential. A syntactically invalid
    /// credential is simply not found.
    async fn get_user_by_api_key(&self, api_key: &str) -> Result<Option<User>>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Create the user and its zero-balance account in one durable unit.
    async fn insert_user(&self, user: &User, account: &Account) -> Result<()>;

    async fn update_api_key(&self, wallet_id: Uuid, api_key: Uuid) -> Result<()>;

    /// Delete the user; the account and transaction history go with it.
    async fn delete_user(&self, wallet_id: Uuid) -> Result<()>;

    async fn get_account(&self, wallet_id: Uuid) -> Result<Option<Account>>;

    async fn update_account(&self, account: &Account) -> Result<()>;

    async fn insert_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Write the mutated account and append the ledger entry in one durable
    /// unit; if either write fails, neither is committed.
    async fn persist_execution(&self, account: &Account, transaction: &Transaction) -> Result<()>;

    /// All ledger entries for a wallet, ascending by execution time.
    async fn list_transactions(&self, wallet_id: Uuid) -> Result<Vec<Transaction>>;
}

/// PostgreSQL-backed `LedgerStore`.
///
/// Single-row operations go through the per-entity repositories; the two
/// multi-row operations run inside an explicit transaction.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PostgresStore {
    async fn get_user_by_api_key(&self, api_key: &str) -> Result<Option<User>> {
        let api_key = match Uuid::parse_str(api_key) {
            Ok(key) => key,
            Err(_) => return Ok(None),
        };

        UserRepository::new(self.pool.clone())
            .get_user_by_api_key(api_key)
            .await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        UserRepository::new(self.pool.clone())
            .get_user_by_email(email)
            .await
    }

    async fn insert_user(&self, user: &User, account: &Account) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query(
            r#"
            INSERT INTO users (wallet_id, name, email, password_hash, api_key,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.wallet_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.api_key)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut tx)
        .await
        .context("Failed to insert user")?;

        sqlx::query(
            r#"
            INSERT INTO accounts (wallet_id, usd_balance, bitcoin, ethereum,
                                  litecoin, ripple, other_crypto, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(account.wallet_id)
        .bind(account.usd_balance)
        .bind(account.bitcoin)
        .bind(account.ethereum)
        .bind(account.litecoin)
        .bind(account.ripple)
        .bind(account.other_crypto)
        .bind(account.updated_at)
        .execute(&mut tx)
        .await
        .context("Failed to insert account")?;

        tx.commit().await.context("Failed to commit user creation")?;
        Ok(())
    }

    async fn update_api_key(&self, wallet_id: Uuid, api_key: Uuid) -> Result<()> {
        UserRepository::new(self.pool.clone())
            .update_api_key(wallet_id, api_key)
            .await
    }

    async fn delete_user(&self, wallet_id: Uuid) -> Result<()> {
        UserRepository::new(self.pool.clone())
            .delete_user(wallet_id)
            .await
    }

    async fn get_account(&self, wallet_id: Uuid) -> Result<Option<Account>> {
        AccountRepository::new(self.pool.clone())
            .get_account(wallet_id)
            .await
    }

    async fn update_account(&self, account: &Account) -> Result<()> {
        AccountRepository::new(self.pool.clone())
            .update_account(account)
            .await
    }

    async fn insert_transaction(&self, transaction: &Transaction) -> Result<()> {
        TransactionRepository::new(self.pool.clone())
            .insert_transaction(transaction)
            .await
    }

    async fn persist_execution(&self, account: &Account, transaction: &Transaction) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

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
        .execute(&mut tx)
        .await
        .context("Failed to update account")?;

        sqlx::query(
            r#"
            INSERT INTO transactions (id, wallet_id, tx_type, asset_id, symbol,
                                      price_usd, quantity, executed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(transaction.id)
        .bind(transaction.wallet_id)
        .bind(transaction.tx_type.as_str())
        .bind(transaction.asset_id as i64)
        .bind(&transaction.symbol)
        .bind(transaction.price_usd)
        .bind(transaction.quantity)
        .bind(transaction.executed_at)
        .execute(&mut tx)
        .await
        .context("Failed to insert transaction")?;

        tx.commit().await.context("Failed to commit execution")?;
        Ok(())
    }

    async fn list_transactions(&self, wallet_id: Uuid) -> Result<Vec<Transaction>> {
        TransactionRepository::new(self.pool.clone())
            .list_transactions(wallet_id)
            .await
    }
}
