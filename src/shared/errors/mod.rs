// Shared errors
pub mod auth_error;
pub mod oracle_error;
pub mod transaction_error;

pub use auth_error::*;
pub use oracle_error::*;
pub use transaction_error::*;
