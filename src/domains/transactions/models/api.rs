use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::transactions::models::{Account, InstructionType, Transaction};

// Buy/sell request model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = TradeRequest)]
pub struct TradeRequest {
    /// Price-source asset identifier (Coinlore id, e.g. 90 for BTC)
    #[schema(example = 90)]
    pub asset_id: u32,

    /// Quantity of the asset to buy or sell
    #[schema(example = "0.01")]
    pub quantity: Decimal,
}

// Buy/sell response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = TradeResponse)]
pub struct TradeResponse {
    /// Executed instruction (buy or sell)
    pub instruction: InstructionType,

    /// Asset symbol as reported by the price source
    pub symbol: String,

    /// Executed quantity
    pub quantity: Decimal,

    /// Unit USD price at execution time
    pub price_usd: Decimal,

    /// Success message
    pub message: String,
}

// Add-money request model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = AddMoneyRequest)]
pub struct AddMoneyRequest {
    /// USD amount to credit (must be positive)
    #[schema(example = "1000.00")]
    pub amount: Decimal,
}

// Add-money response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = AddMoneyResponse)]
pub struct AddMoneyResponse {
    /// USD balance after the credit
    pub new_balance: Decimal,

    /// Success message
    pub message: String,
}

// Wallet balance response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = WalletBalanceResponse)]
pub struct WalletBalanceResponse {
    /// Full account snapshot (USD + all asset buckets)
    pub wallet_balance: Account,
}

// Transaction history response model
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = HistoryResponse)]
pub struct HistoryResponse {
    /// Ledger entries ordered by ascending timestamp
    pub transactions: Vec<Transaction>,
}
