// Database module
pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

pub use connection::Database;
pub use memory::MemoryStore;
pub use repositories::*;
pub use store::{LedgerStore, PostgresStore};
