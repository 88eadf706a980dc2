use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::errors::TransactionError;

/// Buy or sell. The closed enum makes an unrecognized instruction
/// unrepresentable past the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InstructionType {
    Buy,
    Sell,
}

impl InstructionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstructionType::Buy => "buy",
            InstructionType::Sell => "sell",
        }
    }
}

impl fmt::Display for InstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstructionType {
    type Err = TransactionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "buy" => Ok(InstructionType::Buy),
            "sell" => Ok(InstructionType::Sell),
            other => Err(TransactionError::InvalidInstruction {
                value: other.to_string(),
            }),
        }
    }
}

/// Immutable ledger entry for one executed instruction.
///
/// Append-only: rows are never updated or individually deleted (closing the
/// owning user cascades the whole history away).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[schema(as = Transaction)]
pub struct Transaction {
    /// Transaction identifier
    pub id: Uuid,

    /// Owning wallet
    pub wallet_id: Uuid,

    /// buy or sell
    pub tx_type: InstructionType,

    /// Price-source asset identifier (Coinlore id)
    pub asset_id: u32,

    /// Asset symbol as the oracle reported it at execution time
    pub symbol: String,

    /// Unit USD price recorded at execution time
    pub price_usd: Decimal,

    /// Quantity of the asset bought or sold
    pub quantity: Decimal,

    /// Execution timestamp (UTC)
    pub executed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_instruction_types() {
        assert_eq!("buy".parse::<InstructionType>().unwrap(), InstructionType::Buy);
        assert_eq!("sell".parse::<InstructionType>().unwrap(), InstructionType::Sell);
    }

    #[test]
    fn rejects_unknown_instruction_types() {
        let err = "transfer".parse::<InstructionType>().unwrap_err();
        assert!(matches!(
            err,
            TransactionError::InvalidInstruction { value } if value == "transfer"
        ));
    }
}
