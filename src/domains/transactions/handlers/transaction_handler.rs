use axum::{extract::State, http::StatusCode, Json};

use crate::domains::transactions::models::{
    AddMoneyRequest, AddMoneyResponse, HistoryResponse, InstructionType, TradeRequest,
    TradeResponse, WalletBalanceResponse,
};
use crate::shared::errors::TransactionError;
use crate::shared::middleware::ApiKey;
use crate::shared::services::AppState;

#[utoipa::path(
    post,
    path = "/api/transactions/buy",
    request_body = TradeRequest,
    responses(
        (status = 200, description = "Buy executed", body = TradeResponse),
        (status = 400, description = "Invalid amount or insufficient funds"),
        (status = 401, description = "Invalid or missing API key"),
        (status = 404, description = "Asset or account not found"),
        (status = 502, description = "Price source unavailable"),
        (status = 500, description = "Internal server error")
    ),
    security(("ApiKeyAuth" = [])),
    tag = "Transactions"
)]
pub async fn buy(
    State(app_state): State<AppState>,
    ApiKey(api_key): ApiKey,
    Json(request): Json<TradeRequest>,
) -> Result<Json<TradeResponse>, (StatusCode, Json<serde_json::Value>)> {
    execute_trade(app_state, api_key, InstructionType::Buy, request).await
}

#[utoipa::path(
    post,
    path = "/api/transactions/sell",
    request_body = TradeRequest,
    responses(
        (status = 200, description = "Sell executed", body = TradeResponse),
        (status = 400, description = "Invalid amount or insufficient asset balance"),
        (status = 401, description = "Invalid or missing API key"),
        (status = 404, description = "Asset or account not found"),
        (status = 502, description = "Price source unavailable"),
        (status = 500, description = "Internal server error")
    ),
    security(("ApiKeyAuth" = [])),
    tag = "Transactions"
)]
pub async fn sell(
    State(app_state): State<AppState>,
    ApiKey(api_key): ApiKey,
    Json(request): Json<TradeRequest>,
) -> Result<Json<TradeResponse>, (StatusCode, Json<serde_json::Value>)> {
    execute_trade(app_state, api_key, InstructionType::Sell, request).await
}

async fn execute_trade(
    app_state: AppState,
    api_key: String,
    instruction: InstructionType,
    request: TradeRequest,
) -> Result<Json<TradeResponse>, (StatusCode, Json<serde_json::Value>)> {
    let receipt = app_state
        .transaction_state
        .engine
        .execute(&api_key, instruction, request.asset_id, request.quantity)
        .await
        .map_err(|e: TransactionError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let message = format!(
        "Successfully executed {} of {} {} at ${} per unit",
        receipt.instruction, receipt.quantity, receipt.symbol, receipt.price_usd
    );

    Ok(Json(TradeResponse {
        instruction: receipt.instruction,
        symbol: receipt.symbol,
        quantity: receipt.quantity,
        price_usd: receipt.price_usd,
        message,
    }))
}

#[utoipa::path(
    post,
    path = "/api/transactions/add-money",
    request_body = AddMoneyRequest,
    responses(
        (status = 200, description = "Funds credited", body = AddMoneyResponse),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Invalid or missing API key"),
        (status = 500, description = "Internal server error")
    ),
    security(("ApiKeyAuth" = [])),
    tag = "Transactions"
)]
pub async fn add_money(
    State(app_state): State<AppState>,
    ApiKey(api_key): ApiKey,
    Json(request): Json<AddMoneyRequest>,
) -> Result<Json<AddMoneyResponse>, (StatusCode, Json<serde_json::Value>)> {
    let new_balance = app_state
        .transaction_state
        .engine
        .add_funds(&api_key, request.amount)
        .await
        .map_err(|e: TransactionError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(AddMoneyResponse {
        new_balance,
        message: format!("Successfully added ${} to wallet", request.amount),
    }))
}

#[utoipa::path(
    get,
    path = "/api/transactions/balance",
    responses(
        (status = 200, description = "Current wallet balance", body = WalletBalanceResponse),
        (status = 401, description = "Invalid or missing API key"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("ApiKeyAuth" = [])),
    tag = "Transactions"
)]
pub async fn wallet_balance(
    State(app_state): State<AppState>,
    ApiKey(api_key): ApiKey,
) -> Result<Json<WalletBalanceResponse>, (StatusCode, Json<serde_json::Value>)> {
    let account = app_state
        .transaction_state
        .engine
        .get_balance(&api_key)
        .await
        .map_err(|e: TransactionError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(WalletBalanceResponse {
        wallet_balance: account,
    }))
}

#[utoipa::path(
    get,
    path = "/api/transactions/history",
    responses(
        (status = 200, description = "Transaction history, oldest first", body = HistoryResponse),
        (status = 401, description = "Invalid or missing API key"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("ApiKeyAuth" = [])),
    tag = "Transactions"
)]
pub async fn transactions_history(
    State(app_state): State<AppState>,
    ApiKey(api_key): ApiKey,
) -> Result<Json<HistoryResponse>, (StatusCode, Json<serde_json::Value>)> {
    let transactions = app_state
        .transaction_state
        .engine
        .get_history(&api_key)
        .await
        .map_err(|e: TransactionError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(HistoryResponse { transactions }))
}
