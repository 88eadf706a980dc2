use std::sync::Arc;

use anyhow::Result;

use crate::domains::auth::services::AuthState;
use crate::domains::transactions::services::TransactionState;
use crate::shared::cache::MemoryCache;
use crate::shared::clients::CoinloreClient;
use crate::shared::database::{Database, PostgresStore};

/// Application state shared across all domains
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth_state: AuthState,
    pub transaction_state: TransactionState,
}

impl AppState {
    pub fn new(db: Database) -> Result<Self> {
        let store = Arc::new(PostgresStore::new(db.pool().clone()));
        let cache = Arc::new(MemoryCache::new());
        let oracle = Arc::new(
            CoinloreClient::new()
                .map_err(|e| anyhow::anyhow!("Failed to create price client: {}", e))?,
        );

        Ok(Self {
            db,
            auth_state: AuthState::new(store.clone(), cache.clone()),
            transaction_state: TransactionState::new(store, cache, oracle),
        })
    }
}
