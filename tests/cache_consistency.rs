mod common;

use common::*;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

use crypto_gateway::domains::transactions::models::InstructionType;
use crypto_gateway::shared::cache::{CacheStore, MemoryCache};
use crypto_gateway::shared::LedgerStore;
use crypto_gateway::shared::errors::TransactionError;

#[tokio::test]
async fn balance_reads_populate_the_cache() {
    let app = setup();
    let api_key = register_user(&app, "cached@example.com").await;

    assert!(app.cache.is_empty());

    let account = app.engine.get_balance(&api_key).await.unwrap();

    // one entry for the credential, one for the wallet
    assert!(app.cache.get(&api_key).await.unwrap().is_some());
    assert!(app
        .cache
        .get(&account.wallet_id.to_string())
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn writes_are_visible_to_the_next_read() {
    let app = setup();
    let api_key = funded_user(&app, "fresh@example.com", usd(1_000)).await;

    // warm the cache
    let account = app.engine.get_balance(&api_key).await.unwrap();
    assert_eq!(account.usd_balance, usd(1_000));

    app.engine.add_funds(&api_key, usd(500)).await.unwrap();
    let account = app.engine.get_balance(&api_key).await.unwrap();
    assert_eq!(account.usd_balance, usd(1_500));

    app.engine
        .execute(&api_key, InstructionType::Buy, BTC_ID, Decimal::new(1, 2))
        .await
        .unwrap();
    let account = app.engine.get_balance(&api_key).await.unwrap();
    assert_eq!(account.usd_balance, usd(1_000));
    assert_eq!(account.bitcoin, Decimal::new(1, 2));
}

#[tokio::test]
async fn history_is_served_from_cache_until_invalidated() {
    let app = setup();
    let api_key = funded_user(&app, "stale@example.com", usd(1_000)).await;

    app.engine
        .execute(&api_key, InstructionType::Buy, BTC_ID, Decimal::new(1, 2))
        .await
        .unwrap();

    // warm the history cache
    let history = app.engine.get_history(&api_key).await.unwrap();
    assert_eq!(history.len(), 1);

    // a write that bypasses the engine never invalidates, so the cached
    // history keeps being served
    let mut rogue = history[0].clone();
    rogue.id = uuid::Uuid::new_v4();
    app.store.insert_transaction(&rogue).await.unwrap();

    let history = app.engine.get_history(&api_key).await.unwrap();
    assert_eq!(history.len(), 1);

    // an engine write invalidates, and the next read sees everything
    app.engine
        .execute(&api_key, InstructionType::Sell, BTC_ID, Decimal::new(1, 2))
        .await
        .unwrap();

    let history = app.engine.get_history(&api_key).await.unwrap();
    assert_eq!(history.len(), 3);
}

/// Cache that re-inserts a programmed value right after the armed key is
/// deleted, standing in for a reader that repopulates the cache between the
/// engine's pre-write invalidation and the durable write.
struct RepopulatingCache {
    inner: MemoryCache,
    stale: parking_lot::Mutex<Option<(String, String)>>,
}

impl RepopulatingCache {
    fn new() -> Self {
        Self {
            inner: MemoryCache::new(),
            stale: parking_lot::Mutex::new(None),
        }
    }

    fn arm(&self, key: String, value: String) {
        *self.stale.lock() = Some((key, value));
    }
}

#[async_trait]
impl CacheStore for RepopulatingCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.inner.delete(key).await?;

        let armed = {
            let mut stale = self.stale.lock();
            match stale.as_ref() {
                Some((armed_key, _)) if armed_key == key => stale.take(),
                _ => None,
            }
        };
        if let Some((key, value)) = armed {
            self.inner.set(&key, value, None).await?;
        }

        Ok(())
    }
}

#[tokio::test]
async fn post_write_invalidation_evicts_a_racing_repopulation() {
    let cache = Arc::new(RepopulatingCache::new());
    let app = setup_with_cache(cache.clone());
    let api_key = funded_user(&app, "racer@example.com", usd(1_000)).await;

    let account = app.engine.get_balance(&api_key).await.unwrap();
    let wallet_key = account.wallet_id.to_string();
    let stale_snapshot = serde_json::to_string(&account).unwrap();

    // the next delete of the wallet key instantly brings the pre-write
    // snapshot back, as a racing reader would
    cache.arm(wallet_key.clone(), stale_snapshot);

    app.engine
        .execute(&api_key, InstructionType::Buy, BTC_ID, Decimal::new(1, 2))
        .await
        .unwrap();

    assert!(cache.get(&wallet_key).await.unwrap().is_none());

    let account = app.engine.get_balance(&api_key).await.unwrap();
    assert_eq!(account.usd_balance, usd(500));
    assert_eq!(account.bitcoin, Decimal::new(1, 2));
}

#[tokio::test]
async fn corrupt_cache_entries_fall_back_to_the_store() {
    let app = setup();
    let api_key = funded_user(&app, "corrupt@example.com", usd(1_000)).await;

    let account = app.engine.get_balance(&api_key).await.unwrap();

    app.cache
        .set(&api_key, "{not json".to_string(), None)
        .await
        .unwrap();
    app.cache
        .set(&account.wallet_id.to_string(), "[]".to_string(), None)
        .await
        .unwrap();

    let account = app.engine.get_balance(&api_key).await.unwrap();
    assert_eq!(account.usd_balance, usd(1_000));
}

#[tokio::test]
async fn requests_succeed_when_every_cache_operation_fails() {
    let app = setup_with_failing_cache();
    let api_key = funded_user(&app, "nocache@example.com", usd(1_000)).await;

    app.engine
        .execute(&api_key, InstructionType::Buy, BTC_ID, Decimal::new(1, 2))
        .await
        .unwrap();

    let account = app.engine.get_balance(&api_key).await.unwrap();
    assert_eq!(account.usd_balance, usd(500));
    assert_eq!(account.bitcoin, Decimal::new(1, 2));

    let history = app.engine.get_history(&api_key).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn rotating_the_api_key_revokes_the_old_credential_immediately() {
    let app = setup();
    let api_key = funded_user(&app, "rotate@example.com", usd(1_000)).await;

    // cache the user under the old credential
    app.engine.get_balance(&api_key).await.unwrap();

    let new_key = app.auth.rotate_api_key(&api_key).await.unwrap().to_string();

    let err = app.engine.get_balance(&api_key).await.unwrap_err();
    assert!(matches!(err, TransactionError::Unauthorized));

    let account = app.engine.get_balance(&new_key).await.unwrap();
    assert_eq!(account.usd_balance, usd(1_000));
}

#[tokio::test]
async fn closing_an_account_revokes_cached_entries() {
    let app = setup();
    let api_key = funded_user(&app, "closed@example.com", usd(1_000)).await;

    app.engine.get_balance(&api_key).await.unwrap();
    app.auth.close_account(&api_key).await.unwrap();

    let err = app.engine.get_balance(&api_key).await.unwrap_err();
    assert!(matches!(err, TransactionError::Unauthorized));
    assert_eq!(app.store.transaction_count(), 0);
}
