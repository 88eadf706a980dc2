// All repositories module
pub mod account_repository;
pub mod transaction_repository;
pub mod user_repository;

pub use account_repository::AccountRepository;
pub use transaction_repository::TransactionRepository;
pub use user_repository::UserRepository;
