pub mod locks;
pub mod resolver;
pub mod state;
pub mod transaction_engine;

pub use locks::WalletLocks;
pub use resolver::AccountResolver;
pub use state::TransactionState;
pub use transaction_engine::{ExecutionReceipt, TransactionEngine};
