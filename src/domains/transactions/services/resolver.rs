use std::sync::Arc;

use crate::domains::auth::models::User;
use crate::domains::transactions::models::Account;
use crate::shared::cache::CacheStore;
use crate::shared::database::LedgerStore;
use crate::shared::errors::TransactionError;

/// Cache-aside resolution of bearer credential -> User -> Account.
///
/// Reads consult the cache first and fall back to the durable store on miss,
/// repopulating the cache. The durable store always wins: a corrupt cached
/// value is treated as a miss, and cache failures of any kind degrade to
/// store reads. Negative results are never cached, so a freshly registered
/// user is visible immediately.
pub struct AccountResolver {
    store: Arc<dyn LedgerStore>,
    cache: Arc<dyn CacheStore>,
}

impl AccountResolver {
    pub fn new(store: Arc<dyn LedgerStore>, cache: Arc<dyn CacheStore>) -> Self {
        Self { store, cache }
    }

    // Cache read with errors degraded to misses
    async fn cache_get(&self, key: &str) -> Option<String> {
        match self.cache.get(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Cache read failed for key {}: {}", key, e);
                None
            }
        }
    }

    // Best-effort cache write
    async fn cache_set(&self, key: &str, value: String) {
        if let Err(e) = self.cache.set(key, value, None).await {
            tracing::warn!("Cache write failed for key {}: {}", key, e);
        }
    }

    /// Resolve a bearer credential to a user, cache-aside keyed by the
    /// credential itself.
    pub async fn resolve_user(&self, api_key: &str) -> Result<Option<User>, TransactionError> {
        if let Some(cached) = self.cache_get(api_key).await {
            match serde_json::from_str::<User>(&cached) {
                Ok(user) => return Ok(Some(user)),
                Err(e) => {
                    tracing::warn!("Corrupt cached user for key {}: {}", api_key, e);
                }
            }
        }

        let user = self
            .store
            .get_user_by_api_key(api_key)
            .await
            .map_err(|e| TransactionError::DatabaseError(format!("Failed to fetch user: {}", e)))?;

        let user = match user {
            Some(u) => u,
            None => return Ok(None),
        };

        if let Ok(json) = serde_json::to_string(&user) {
            self.cache_set(api_key, json).await;
        }

        Ok(Some(user))
    }

    /// Resolve the account of an already-resolved user, cache-aside keyed by
    /// the wallet identifier.
    pub async fn resolve_account_for(
        &self,
        user: &User,
    ) -> Result<Option<Account>, TransactionError> {
        let wallet_key = user.wallet_id.to_string();

        if let Some(cached) = self.cache_get(&wallet_key).await {
            match serde_json::from_str::<Account>(&cached) {
                Ok(account) => return Ok(Some(account)),
                Err(e) => {
                    tracing::warn!("Corrupt cached account for wallet {}: {}", wallet_key, e);
                }
            }
        }

        let account = self
            .store
            .get_account(user.wallet_id)
            .await
            .map_err(|e| TransactionError::DatabaseError(format!("Failed to fetch account: {}", e)))?;

        let account = match account {
            Some(a) => a,
            None => return Ok(None),
        };

        if let Ok(json) = serde_json::to_string(&account) {
            self.cache_set(&wallet_key, json).await;
        }

        Ok(Some(account))
    }

    /// Resolve credential -> user -> account in one step. Not-found if either
    /// step fails.
    pub async fn resolve_account(
        &self,
        api_key: &str,
    ) -> Result<Option<(User, Account)>, TransactionError> {
        let user = match self.resolve_user(api_key).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        match self.resolve_account_for(&user).await? {
            Some(account) => Ok(Some((user, account))),
            None => Ok(None),
        }
    }
}
