// Transactions domain state
use std::sync::Arc;

use crate::domains::transactions::services::TransactionEngine;
use crate::shared::cache::CacheStore;
use crate::shared::clients::PriceOracle;
use crate::shared::database::LedgerStore;

/// Transactions domain state
#[derive(Clone)]
pub struct TransactionState {
    pub engine: Arc<TransactionEngine>,
}

impl TransactionState {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        cache: Arc<dyn CacheStore>,
        oracle: Arc<dyn PriceOracle>,
    ) -> Self {
        Self {
            engine: Arc::new(TransactionEngine::new(store, cache, oracle)),
        }
    }
}
