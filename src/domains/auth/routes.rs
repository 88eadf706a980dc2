// Auth domain routes
use axum::{
    routing::{delete, post},
    Router,
};

use crate::domains::auth::handlers::auth_handler;
use crate::shared::services::AppState;

/// Create authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth_handler::register))
        .route("/login", post(auth_handler::login))
        .route("/rotate-key", post(auth_handler::rotate_key))
        .route("/account", delete(auth_handler::close_account))
}
