use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account row: one per user, keyed by the shared wallet id.
///
/// A fixed set of named cryptocurrency buckets plus `other_crypto` for any
/// symbol outside that set. Invariant: every balance is non-negative at all
/// times; the engine rejects any instruction that would violate this before
/// mutating anything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[schema(as = Account)]
pub struct Account {
    /// Wallet identifier (shared primary key with the user)
    pub wallet_id: Uuid,

    /// USD balance
    pub usd_balance: Decimal,

    /// Bitcoin (BTC) balance
    pub bitcoin: Decimal,

    /// Ethereum (ETH) balance
    pub ethereum: Decimal,

    /// Litecoin (LTC) balance
    pub litecoin: Decimal,

    /// Ripple (XRP) balance
    pub ripple: Decimal,

    /// Catch-all bucket for any other asset symbol
    pub other_crypto: Decimal,

    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Fresh account with every balance at zero.
    pub fn new(wallet_id: Uuid) -> Self {
        Self {
            wallet_id,
            usd_balance: Decimal::ZERO,
            bitcoin: Decimal::ZERO,
            ethereum: Decimal::ZERO,
            litecoin: Decimal::ZERO,
            ripple: Decimal::ZERO,
            other_crypto: Decimal::ZERO,
            updated_at: Utc::now(),
        }
    }

    /// Balance of the bucket selected by an upper-cased symbol.
    pub fn asset_balance(&self, symbol: &str) -> Decimal {
        match symbol {
            "BTC" => self.bitcoin,
            "ETH" => self.ethereum,
            "LTC" => self.litecoin,
            "XRP" => self.ripple,
            _ => self.other_crypto,
        }
    }

    /// Adjust the bucket selected by an upper-cased symbol.
    /// Positive delta for a buy, negative for a sell. `None` when the new
    /// balance would not fit in a `Decimal`; the bucket is left untouched.
    pub fn credit_asset(&mut self, symbol: &str, delta: Decimal) -> Option<()> {
        let bucket = match symbol {
            "BTC" => &mut self.bitcoin,
            "ETH" => &mut self.ethereum,
            "LTC" => &mut self.litecoin,
            "XRP" => &mut self.ripple,
            _ => &mut self.other_crypto,
        };
        *bucket = bucket.checked_add(delta)?;
        Some(())
    }
}
