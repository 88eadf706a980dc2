// Transactions domain routes
use axum::{
    routing::{get, post},
    Router,
};

use crate::domains::transactions::handlers::transaction_handler;
use crate::shared::services::AppState;

/// Create transactions router
pub fn create_transaction_router() -> Router<AppState> {
    Router::new()
        .route("/buy", post(transaction_handler::buy))
        .route("/sell", post(transaction_handler::sell))
        .route("/add-money", post(transaction_handler::add_money))
        .route("/balance", get(transaction_handler::wallet_balance))
        .route("/history", get(transaction_handler::transactions_history))
}
