#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;

use crypto_gateway::domains::auth::services::AuthService;
use crypto_gateway::domains::auth::models::RegisterRequest;
use crypto_gateway::domains::transactions::services::TransactionEngine;
use crypto_gateway::shared::cache::{CacheStore, MemoryCache};
use crypto_gateway::shared::clients::{PriceOracle, Ticker};
use crypto_gateway::shared::database::MemoryStore;
use crypto_gateway::shared::errors::OracleError;

/// Price oracle returning fixed quotes from a preloaded table.
pub struct FixedPriceOracle {
    prices: HashMap<u32, Ticker>,
}

impl FixedPriceOracle {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
        }
    }

    pub fn with_price(mut self, asset_id: u32, symbol: &str, price_usd: Decimal) -> Self {
        self.prices.insert(
            asset_id,
            Ticker {
                symbol: symbol.to_string(),
                price_usd,
            },
        );
        self
    }
}

#[async_trait]
impl PriceOracle for FixedPriceOracle {
    async fn fetch_price(&self, asset_id: u32) -> Result<Ticker, OracleError> {
        self.prices
            .get(&asset_id)
            .cloned()
            .ok_or(OracleError::NotFound(asset_id))
    }
}

/// Cache whose every operation fails. Requests must still succeed against it.
pub struct FailingCache;

#[async_trait]
impl CacheStore for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        bail!("cache connection refused")
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Option<Duration>) -> Result<()> {
        bail!("cache connection refused")
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        bail!("cache connection refused")
    }
}

/// Everything a test needs: shared store and cache plus the services built
/// on top of them.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub cache: Arc<MemoryCache>,
    pub auth: AuthService,
    pub engine: Arc<TransactionEngine>,
}

/// Default asset table: BTC at $50,000, ETH at $2,000, DOGE at $0.10.
pub const BTC_ID: u32 = 90;
pub const ETH_ID: u32 = 80;
pub const DOGE_ID: u32 = 2;

pub fn default_oracle() -> FixedPriceOracle {
    FixedPriceOracle::new()
        .with_price(BTC_ID, "BTC", Decimal::new(50_000, 0))
        .with_price(ETH_ID, "ETH", Decimal::new(2_000, 0))
        .with_price(DOGE_ID, "DOGE", Decimal::new(1, 1))
}

pub fn setup() -> TestApp {
    setup_with_oracle(default_oracle())
}

pub fn setup_with_oracle(oracle: FixedPriceOracle) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(MemoryCache::new());
    let auth = AuthService::new(store.clone(), cache.clone());
    let engine = Arc::new(TransactionEngine::new(
        store.clone(),
        cache.clone(),
        Arc::new(oracle),
    ));

    TestApp {
        store,
        cache,
        auth,
        engine,
    }
}

/// Build the services on an arbitrary cache implementation. The `cache`
/// field of the returned app is a detached `MemoryCache` the services never
/// touch.
pub fn setup_with_cache(shared_cache: Arc<dyn CacheStore>) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let cache = Arc::new(MemoryCache::new());
    let auth = AuthService::new(store.clone(), shared_cache.clone());
    let engine = Arc::new(TransactionEngine::new(
        store.clone(),
        shared_cache,
        Arc::new(default_oracle()),
    ));

    TestApp {
        store,
        cache,
        auth,
        engine,
    }
}

/// Build the services on a cache where every operation errors.
pub fn setup_with_failing_cache() -> TestApp {
    setup_with_cache(Arc::new(FailingCache))
}

/// Register a user and return the API key as the wire-format string.
pub async fn register_user(app: &TestApp, email: &str) -> String {
    let user = app
        .auth
        .register(RegisterRequest {
            email: email.to_string(),
            password: "password123".to_string(),
            name: None,
        })
        .await
        .expect("registration failed");

    user.api_key.to_string()
}

/// Register a user and credit `usd` to the fresh wallet.
pub async fn funded_user(app: &TestApp, email: &str, usd: Decimal) -> String {
    let api_key = register_user(app, email).await;
    app.engine
        .add_funds(&api_key, usd)
        .await
        .expect("funding failed");
    api_key
}

pub fn usd(value: i64) -> Decimal {
    Decimal::new(value, 0)
}
