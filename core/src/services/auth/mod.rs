//! Authentication flows: registration, login, OAuth and token refresh.

pub mod config;
pub mod service;

pub use config::AuthConfig;
pub use service::AuthService;
