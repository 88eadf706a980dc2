// Routes module: combines all domain routers

use axum::Router;

use crate::domains::auth::routes::create_auth_router;
use crate::domains::transactions::routes::create_transaction_router;
use crate::shared::services::AppState;

/// Create main router (combines all domain routers)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", create_auth_router())
        .nest("/api/transactions", create_transaction_router())
}
