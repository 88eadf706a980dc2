// Shared module
pub mod cache;
pub mod clients;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;

pub use cache::{CacheStore, MemoryCache, DEFAULT_TTL};
pub use clients::*;
pub use database::*;
pub use errors::*;
pub use middleware::*;
pub use services::*;
