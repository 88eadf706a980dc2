use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

/// Per-wallet mutual exclusion registry.
///
/// The engine holds a wallet's mutex from the durable load through the
/// durable persist, so two instructions against the same wallet can never
/// both validate against the same pre-mutation balance. Instructions against
/// different wallets run in parallel.
///
/// The registry keeps one entry per wallet ever touched by this process;
/// entries are a pointer plus an idle mutex, bounded by the user population.
#[derive(Clone, Default)]
pub struct WalletLocks {
    locks: Arc<parking_lot::Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl WalletLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutex guarding the given wallet. The returned handle must be locked
    /// with `.lock().await`; holding the registry lock itself is only for the
    /// map lookup.
    pub fn for_wallet(&self, wallet_id: Uuid) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .entry(wallet_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_wallet_returns_same_mutex() {
        let locks = WalletLocks::new();
        let wallet = Uuid::new_v4();

        let a = locks.for_wallet(wallet);
        let b = locks.for_wallet(wallet);
        assert!(Arc::ptr_eq(&a, &b));

        let other = locks.for_wallet(Uuid::new_v4());
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[tokio::test]
    async fn lock_serializes_holders() {
        let locks = WalletLocks::new();
        let wallet = Uuid::new_v4();

        let mutex = locks.for_wallet(wallet);
        let guard = mutex.lock().await;

        let second = locks.for_wallet(wallet);
        assert!(second.try_lock().is_err());

        drop(guard);
        assert!(second.try_lock().is_ok());
    }
}
