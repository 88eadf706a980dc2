// Auth domain state
use std::sync::Arc;

use crate::domains::auth::services::AuthService;
use crate::shared::cache::CacheStore;
use crate::shared::database::LedgerStore;

/// Auth domain state
#[derive(Clone)]
pub struct AuthState {
    pub auth_service: AuthService,
}

impl AuthState {
    pub fn new(store: Arc<dyn LedgerStore>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            auth_service: AuthService::new(store, cache),
        }
    }
}
