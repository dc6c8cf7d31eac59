//! Infrastructure layer for the Atelier backend.
//!
//! Concrete implementations of the `atelier_core` contracts: MySQL
//! repositories, Cloudinary image storage and the Google OAuth provider.

pub mod database;
pub mod oauth;
pub mod storage;

pub use database::connection::create_pool;
pub use database::mysql::{MySqlClientRepository, MySqlStyleRepository, MySqlUserRepository};
pub use oauth::GoogleOAuthProvider;
pub use storage::CloudinaryStorage;
