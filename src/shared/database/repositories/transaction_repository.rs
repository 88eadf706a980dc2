use sqlx::{PgPool, Row};
use anyhow::{anyhow, Context, Result};
use uuid::Uuid;

use crate::domains::transactions::models::{InstructionType, Transaction};

pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Append one ledger entry
    pub async fn insert_transaction(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, wallet_id, tx_type, asset_id, symbol,
                                      price_usd, quantity, executed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(transaction.id)
        .bind(transaction.wallet_id)
        .bind(transaction.tx_type.as_str())
        .bind(transaction.asset_id as i64)
        .bind(&transaction.symbol)
        .bind(transaction.price_usd)
        .bind(transaction.quantity)
        .bind(transaction.executed_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert transaction")?;

        Ok(())
    }

    // All entries for a wallet, ascending by execution time
    pub async fn list_transactions(&self, wallet_id: Uuid) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, wallet_id, tx_type, asset_id, symbol, price_usd, quantity, executed_at
            FROM transactions
            WHERE wallet_id = $1
            ORDER BY executed_at ASC
            "#,
        )
        .bind(wallet_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch transactions")?;

        rows.into_iter()
            .map(|row| {
                let tx_type: String = row.get("tx_type");
                let tx_type = tx_type
                    .parse::<InstructionType>()
                    .map_err(|_| anyhow!("Invalid tx_type in ledger row: {}", tx_type))?;

                Ok(Transaction {
                    id: row.get("id"),
                    wallet_id: row.get("wallet_id"),
                    tx_type,
                    asset_id: row.get::<i64, _>("asset_id") as u32,
                    symbol: row.get("symbol"),
                    price_usd: row.get("price_usd"),
                    quantity: row.get("quantity"),
                    executed_at: row.get("executed_at"),
                })
            })
            .collect()
    }
}
