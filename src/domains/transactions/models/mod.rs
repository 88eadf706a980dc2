pub mod account;
pub mod api;
pub mod transaction;

pub use account::*;
pub use api::*;
pub use transaction::*;
