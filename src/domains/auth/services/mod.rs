pub mod auth_service;
pub mod state;

pub use auth_service::AuthService;
pub use state::AuthState;
