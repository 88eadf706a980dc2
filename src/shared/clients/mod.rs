// =====================================================
// External clients
// =====================================================
// The price oracle is the only external collaborator the core talks to.
// Service code depends on the `PriceOracle` trait, not on the HTTP client,
// so tests can substitute a fixed-price implementation.
// =====================================================

pub mod coinlore;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::shared::errors::OracleError;

pub use coinlore::CoinloreClient;

/// Current quote for one asset.
#[derive(Debug, Clone)]
pub struct Ticker {
    /// Upper-cased asset symbol (e.g. "BTC")
    pub symbol: String,
    /// Current USD price
    pub price_usd: Decimal,
}

/// External USD price source.
///
/// A pure external read: no ordering guarantee relative to other price reads
/// and no role in concurrency control.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    async fn fetch_price(&self, asset_id: u32) -> Result<Ticker, OracleError>;
}
