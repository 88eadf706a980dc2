// =====================================================
// Cache layer
// =====================================================
// Disposable key-value overlay in front of the durable store.
//
// Contract:
// - get/set/delete over string keys and JSON string values
// - per-entry TTL, 1 hour when unspecified
// - no authority: on any disagreement with the durable store the cached
//   entry is invalid and must be refreshed
// - callers treat every error as a miss; cache failure never fails a request
// =====================================================

pub mod memory;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

pub use memory::MemoryCache;

/// Default expiry for cache entries written without an explicit TTL.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Key-value cache with per-entry expiry.
///
/// Implementations are not assumed to be linearizable with durable-store
/// writes; correctness comes from explicit invalidation, never from TTL.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up a key. `Ok(None)` is a miss; expired entries are misses.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value under a key, expiring after `ttl` (default 1 hour).
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()>;

    /// Drop a key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}
