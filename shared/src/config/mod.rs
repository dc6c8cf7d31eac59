//! Application configuration loaded from environment variables.
//!
//! Each sub-module owns one concern (server, database, auth, storage).
//! Configuration is read once at process start in `main` and passed down
//! explicitly; nothing here is re-evaluated per request.

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;
pub mod storage;

pub use auth::{GoogleOAuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::ServerConfig;
pub use storage::CloudinaryConfig;
