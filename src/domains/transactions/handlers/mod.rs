pub mod transaction_handler;
