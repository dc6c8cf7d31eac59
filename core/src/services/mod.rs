//! Domain services.

pub mod admin;
pub mod auth;
pub mod clients;
pub mod oauth;
pub mod password;
pub mod storage;
pub mod styles;
pub mod token;

pub use admin::AdminService;
pub use auth::AuthService;
pub use clients::ClientService;
pub use styles::StyleService;
pub use token::TokenService;
