use std::collections::HashMap;

use anyhow::{bail, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::store::LedgerStore;
use crate::domains::auth::models::User;
use crate::domains::transactions::models::{Account, Transaction};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    accounts: HashMap<Uuid, Account>,
    transactions: Vec<Transaction>,
}

/// In-memory `LedgerStore`
///
/// Reference implementation of the store contract, used by the integration
/// tests. Multi-row operations hold the write lock for their whole duration,
/// matching the atomicity the PostgreSQL adapter gets from transactions.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of ledger entries across all wallets.
    pub fn transaction_count(&self) -> usize {
        self.inner.read().transactions.len()
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn get_user_by_api_key(&self, api_key: &str) -> Result<Option<User>> {
        let api_key = match Uuid::parse_str(api_key) {
            Ok(key) => key,
            Err(_) => return Ok(None),
        };

        Ok(self
            .inner
            .read()
            .users
            .values()
            .find(|u| u.api_key == api_key)
            .cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .inner
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert_user(&self, user: &User, account: &Account) -> Result<()> {
        let mut inner = self.inner.write();

        if inner.users.values().any(|u| u.email == user.email) {
            bail!("unique constraint violated: email {}", user.email);
        }
        if inner.users.contains_key(&user.wallet_id) {
            bail!("unique constraint violated: wallet {}", user.wallet_id);
        }

        inner.users.insert(user.wallet_id, user.clone());
        inner.accounts.insert(account.wallet_id, account.clone());
        Ok(())
    }

    async fn update_api_key(&self, wallet_id: Uuid, api_key: Uuid) -> Result<()> {
        let mut inner = self.inner.write();
        match inner.users.get_mut(&wallet_id) {
            Some(user) => {
                user.api_key = api_key;
                Ok(())
            }
            None => bail!("user not found: {}", wallet_id),
        }
    }

    async fn delete_user(&self, wallet_id: Uuid) -> Result<()> {
        let mut inner = self.inner.write();
        inner.users.remove(&wallet_id);
        inner.accounts.remove(&wallet_id);
        inner.transactions.retain(|t| t.wallet_id != wallet_id);
        Ok(())
    }

    async fn get_account(&self, wallet_id: Uuid) -> Result<Option<Account>> {
        Ok(self.inner.read().accounts.get(&wallet_id).cloned())
    }

    async fn update_account(&self, account: &Account) -> Result<()> {
        let mut inner = self.inner.write();
        match inner.accounts.get_mut(&account.wallet_id) {
            Some(existing) => {
                *existing = account.clone();
                Ok(())
            }
            None => bail!("account not found: {}", account.wallet_id),
        }
    }

    async fn insert_transaction(&self, transaction: &Transaction) -> Result<()> {
        self.inner.write().transactions.push(transaction.clone());
        Ok(())
    }

    async fn persist_execution(&self, account: &Account, transaction: &Transaction) -> Result<()> {
        let mut inner = self.inner.write();
        match inner.accounts.get_mut(&account.wallet_id) {
            Some(existing) => *existing = account.clone(),
            None => bail!("account not found: {}", account.wallet_id),
        }
        inner.transactions.push(transaction.clone());
        Ok(())
    }

    async fn list_transactions(&self, wallet_id: Uuid) -> Result<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .inner
            .read()
            .transactions
            .iter()
            .filter(|t| t.wallet_id == wallet_id)
            .cloned()
            .collect();

        // stable sort keeps insertion order for equal timestamps
        transactions.sort_by_key(|t| t.executed_at);
        Ok(transactions)
    }
}
