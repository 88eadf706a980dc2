use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{PriceOracle, Ticker};
use crate::shared::errors::OracleError;

const DEFAULT_BASE_URL: &str = "https://api.coinlore.net/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Coinlore ticker API client
///
/// `GET {base}/ticker/?id={asset_id}` returns a JSON array with one object per
/// listed asset; an empty array means the id is unknown. Prices come back as
/// decimal strings.
pub struct CoinloreClient {
    http_client: reqwest::Client,
    base_url: String,
}

/// Raw ticker object as Coinlore serializes it (subset of fields).
#[derive(Debug, Deserialize)]
struct RawTicker {
    symbol: String,
    price_usd: String,
}

impl CoinloreClient {
    pub fn new() -> Result<Self, OracleError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, OracleError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| OracleError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn parse_tickers(asset_id: u32, tickers: Vec<RawTicker>) -> Result<Ticker, OracleError> {
        let raw = tickers
            .into_iter()
            .next()
            .ok_or(OracleError::NotFound(asset_id))?;

        let price_usd = raw.price_usd.parse::<Decimal>().map_err(|e| {
            OracleError::Malformed(format!("Unparsable price_usd {:?}: {}", raw.price_usd, e))
        })?;

        Ok(Ticker {
            symbol: raw.symbol.to_uppercase(),
            price_usd,
        })
    }
}

#[async_trait]
impl PriceOracle for CoinloreClient {
    async fn fetch_price(&self, asset_id: u32) -> Result<Ticker, OracleError> {
        let url = format!("{}/ticker/?id={}", self.base_url, asset_id);

        let response = self
            .http_client
            .get(&url)
            .header("User-Agent", "crypto-gateway/1.0")
            .send()
            .await
            .map_err(|e| OracleError::Unavailable(format!("Request to price source failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(OracleError::Unavailable(format!(
                "Price source returned status {}",
                response.status()
            )));
        }

        let tickers: Vec<RawTicker> = response
            .json()
            .await
            .map_err(|e| OracleError::Malformed(format!("Failed to parse ticker response: {}", e)))?;

        Self::parse_tickers(asset_id, tickers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ticker_payload() {
        let payload = r#"[{"id":"90","symbol":"btc","name":"Bitcoin","price_usd":"50000.00"}]"#;
        let tickers: Vec<RawTicker> = serde_json::from_str(payload).unwrap();
        let ticker = CoinloreClient::parse_tickers(90, tickers).unwrap();
        assert_eq!(ticker.symbol, "BTC");
        assert_eq!(ticker.price_usd, Decimal::new(50000, 0));
    }

    #[test]
    fn empty_payload_is_not_found() {
        let tickers: Vec<RawTicker> = serde_json::from_str("[]").unwrap();
        let err = CoinloreClient::parse_tickers(999, tickers).unwrap_err();
        assert!(matches!(err, OracleError::NotFound(999)));
    }

    #[test]
    fn garbage_price_is_malformed() {
        let payload = r#"[{"symbol":"BTC","price_usd":"not-a-number"}]"#;
        let tickers: Vec<RawTicker> = serde_json::from_str(payload).unwrap();
        let err = CoinloreClient::parse_tickers(90, tickers).unwrap_err();
        assert!(matches!(err, OracleError::Malformed(_)));
    }
}
