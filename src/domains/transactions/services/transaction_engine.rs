// =====================================================
// Transaction engine
// =====================================================
// Orchestrates one instruction per call:
//   Resolve -> Invalidate -> Load -> Price -> Validate -> Apply -> Persist
//
// Consistency rules:
// - cache entries for the wallet and its history are deleted BEFORE the
//   durable write; write-then-invalidate would let a concurrent reader
//   repopulate the cache with the pre-write value after the write lands
// - they are deleted AGAIN after the write: a reader racing between the
//   first delete and the persist can repopulate the cache with the
//   pre-write snapshot, and the second delete evicts it
// - the account for a mutation is loaded from the durable store, never the
//   cache
// - a per-wallet mutex is held from Load through Persist, so concurrent
//   instructions against one wallet cannot both validate against the same
//   pre-mutation balance
// - every business-rule failure fires before any mutation; persistence
//   failure discards the in-memory mutation
// =====================================================

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domains::transactions::models::{Account, InstructionType, Transaction};
use crate::domains::transactions::services::{AccountResolver, WalletLocks};
use crate::shared::cache::CacheStore;
use crate::shared::clients::PriceOracle;
use crate::shared::database::LedgerStore;
use crate::shared::errors::TransactionError;

/// Confirmation returned for a successfully executed instruction.
#[derive(Debug, Clone)]
pub struct ExecutionReceipt {
    pub instruction: InstructionType,
    pub symbol: String,
    pub quantity: Decimal,
    pub price_usd: Decimal,
}

pub struct TransactionEngine {
    store: Arc<dyn LedgerStore>,
    cache: Arc<dyn CacheStore>,
    oracle: Arc<dyn PriceOracle>,
    resolver: AccountResolver,
    locks: WalletLocks,
}

impl TransactionEngine {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        cache: Arc<dyn CacheStore>,
        oracle: Arc<dyn PriceOracle>,
    ) -> Self {
        let resolver = AccountResolver::new(store.clone(), cache.clone());
        Self {
            store,
            cache,
            oracle,
            resolver,
            locks: WalletLocks::new(),
        }
    }

    /// Composite cache key for a wallet's transaction history.
    fn history_key(api_key: &str, wallet_id: Uuid) -> String {
        format!("{}:{}", api_key, wallet_id)
    }

    // Best-effort cache delete; failure degrades to a stale-tolerant miss on
    // the durable-load path below, never to a failed request
    async fn invalidate(&self, key: &str) {
        if let Err(e) = self.cache.delete(key).await {
            tracing::warn!("Cache invalidation failed for key {}: {}", key, e);
        }
    }

    /// Execute one buy or sell against the wallet behind `api_key`.
    pub async fn execute(
        &self,
        api_key: &str,
        instruction: InstructionType,
        asset_id: u32,
        quantity: Decimal,
    ) -> Result<ExecutionReceipt, TransactionError> {
        if quantity <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount { amount: quantity });
        }

        // Resolve
        let user = self
            .resolver
            .resolve_user(api_key)
            .await?
            .ok_or(TransactionError::Unauthorized)?;

        // One mutation per wallet in flight at a time
        let wallet_lock = self.locks.for_wallet(user.wallet_id);
        let _held = wallet_lock.lock().await;

        // Invalidate before touching durable state
        self.invalidate(&user.wallet_id.to_string()).await;
        self.invalidate(&Self::history_key(api_key, user.wallet_id))
            .await;

        // Load from the durable store, not the cache
        let mut account = self
            .store
            .get_account(user.wallet_id)
            .await
            .map_err(|e| TransactionError::DatabaseError(format!("Failed to fetch account: {}", e)))?
            .ok_or(TransactionError::AccountNotFound)?;

        // Price. A total or balance that does not fit in a Decimal is a
        // rejection, never a panic.
        let ticker = self.oracle.fetch_price(asset_id).await?;
        let total_cost = ticker
            .price_usd
            .checked_mul(quantity)
            .ok_or(TransactionError::InvalidAmount { amount: quantity })?;

        // Validate, then apply on the local copy
        match instruction {
            InstructionType::Buy => {
                if account.usd_balance < total_cost {
                    return Err(TransactionError::InsufficientFunds {
                        required: total_cost,
                        available: account.usd_balance,
                    });
                }
                account.usd_balance -= total_cost;
                account
                    .credit_asset(&ticker.symbol, quantity)
                    .ok_or(TransactionError::InvalidAmount { amount: quantity })?;
            }
            InstructionType::Sell => {
                let available = account.asset_balance(&ticker.symbol);
                if available < quantity {
                    return Err(TransactionError::InsufficientAsset {
                        symbol: ticker.symbol.clone(),
                        required: quantity,
                        available,
                    });
                }
                account
                    .credit_asset(&ticker.symbol, -quantity)
                    .ok_or(TransactionError::InvalidAmount { amount: quantity })?;
                account.usd_balance = account
                    .usd_balance
                    .checked_add(total_cost)
                    .ok_or(TransactionError::InvalidAmount { amount: quantity })?;
            }
        }

        // Persist account + ledger entry in one durable unit
        let transaction = Transaction {
            id: Uuid::new_v4(),
            wallet_id: user.wallet_id,
            tx_type: instruction,
            asset_id,
            symbol: ticker.symbol.clone(),
            price_usd: ticker.price_usd,
            quantity,
            executed_at: Utc::now(),
        };

        self.store
            .persist_execution(&account, &transaction)
            .await
            .map_err(|e| TransactionError::PersistenceError(e.to_string()))?;

        // evict anything a racing reader repopulated since the first delete
        self.invalidate(&user.wallet_id.to_string()).await;
        self.invalidate(&Self::history_key(api_key, user.wallet_id))
            .await;

        tracing::info!(
            "Executed {} of {} {} at ${} for wallet {}",
            instruction,
            quantity,
            ticker.symbol,
            ticker.price_usd,
            user.wallet_id
        );

        Ok(ExecutionReceipt {
            instruction,
            symbol: ticker.symbol,
            quantity,
            price_usd: ticker.price_usd,
        })
    }

    /// Credit USD to the wallet's balance. Returns the new balance.
    pub async fn add_funds(
        &self,
        api_key: &str,
        amount: Decimal,
    ) -> Result<Decimal, TransactionError> {
        if amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount { amount });
        }

        let user = self
            .resolver
            .resolve_user(api_key)
            .await?
            .ok_or(TransactionError::Unauthorized)?;

        let wallet_lock = self.locks.for_wallet(user.wallet_id);
        let _held = wallet_lock.lock().await;

        self.invalidate(&user.wallet_id.to_string()).await;

        let mut account = self
            .store
            .get_account(user.wallet_id)
            .await
            .map_err(|e| TransactionError::DatabaseError(format!("Failed to fetch account: {}", e)))?
            .ok_or(TransactionError::AccountNotFound)?;

        account.usd_balance = account
            .usd_balance
            .checked_add(amount)
            .ok_or(TransactionError::InvalidAmount { amount })?;

        self.store
            .update_account(&account)
            .await
            .map_err(|e| TransactionError::PersistenceError(e.to_string()))?;

        self.invalidate(&user.wallet_id.to_string()).await;

        tracing::info!("Added ${} to wallet {}", amount, user.wallet_id);

        Ok(account.usd_balance)
    }

    /// Current account snapshot (cache-aside read).
    pub async fn get_balance(&self, api_key: &str) -> Result<Account, TransactionError> {
        let user = self
            .resolver
            .resolve_user(api_key)
            .await?
            .ok_or(TransactionError::Unauthorized)?;

        self.resolver
            .resolve_account_for(&user)
            .await?
            .ok_or(TransactionError::AccountNotFound)
    }

    /// Transaction history ordered by ascending timestamp, cache-aside on the
    /// composite (credential, wallet) key.
    pub async fn get_history(&self, api_key: &str) -> Result<Vec<Transaction>, TransactionError> {
        let (user, _account) = self
            .resolver
            .resolve_account(api_key)
            .await?
            .ok_or(TransactionError::Unauthorized)?;

        let key = Self::history_key(api_key, user.wallet_id);

        match self.cache.get(&key).await {
            Ok(Some(cached)) => match serde_json::from_str::<Vec<Transaction>>(&cached) {
                Ok(history) => return Ok(history),
                Err(e) => {
                    tracing::warn!("Corrupt cached history for key {}: {}", key, e);
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Cache read failed for key {}: {}", key, e);
            }
        }

        let history = self
            .store
            .list_transactions(user.wallet_id)
            .await
            .map_err(|e| TransactionError::DatabaseError(format!("Failed to fetch history: {}", e)))?;

        if let Ok(json) = serde_json::to_string(&history) {
            if let Err(e) = self.cache.set(&key, json, None).await {
                tracing::warn!("Cache write failed for key {}: {}", key, e);
            }
        }

        Ok(history)
    }
}
