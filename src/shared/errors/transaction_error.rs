use thiserror::Error;
use axum::{http::StatusCode, Json};
use rust_decimal::Decimal;
use serde_json::json;

use super::OracleError;

/// Transaction engine errors
///
/// Every business-rule rejection is raised before any balance mutation; only
/// `PersistenceError` can occur after validation passed, and it means the
/// whole durable write was rolled back.
#[derive(Error, Debug)]
pub enum TransactionError {
    /// API key does not resolve to a user
    #[error("Invalid or missing API key")]
    Unauthorized,

    /// User exists but has no account row
    #[error("Account not found")]
    AccountNotFound,

    /// The price source has no listing for the asset id
    #[error("Currency not found: id={asset_id}")]
    AssetNotFound { asset_id: u32 },

    /// Instruction string was neither "buy" nor "sell"
    #[error("Invalid transaction type: {value}")]
    InvalidInstruction { value: String },

    /// Quantity or amount was zero or negative
    #[error("Amount must be positive: {amount}")]
    InvalidAmount { amount: Decimal },

    /// USD balance too low for the buy
    #[error("Insufficient funds: required ${required}, available ${available}")]
    InsufficientFunds { required: Decimal, available: Decimal },

    /// Asset balance too low for the sell
    #[error("Insufficient {symbol} balance: required {required}, available {available}")]
    InsufficientAsset {
        symbol: String,
        required: Decimal,
        available: Decimal,
    },

    /// Price oracle unreachable or returned garbage
    #[error("Price source unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Durable write failed after validation; nothing was committed
    #[error("Failed to persist transaction: {0}")]
    PersistenceError(String),

    /// Durable read failed
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<OracleError> for TransactionError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::NotFound(asset_id) => TransactionError::AssetNotFound { asset_id },
            OracleError::Unavailable(msg) => TransactionError::UpstreamUnavailable(msg),
            OracleError::Malformed(msg) => TransactionError::UpstreamUnavailable(msg),
        }
    }
}

impl From<TransactionError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: TransactionError) -> Self {
        let status = match &err {
            TransactionError::Unauthorized => StatusCode::UNAUTHORIZED,
            TransactionError::AccountNotFound | TransactionError::AssetNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            TransactionError::InvalidInstruction { .. }
            | TransactionError::InvalidAmount { .. }
            | TransactionError::InsufficientFunds { .. }
            | TransactionError::InsufficientAsset { .. } => StatusCode::BAD_REQUEST,
            TransactionError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            TransactionError::PersistenceError(_) | TransactionError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
