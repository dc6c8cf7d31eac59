//! Route handlers.

pub mod admin;
pub mod auth;
pub mod clients;
pub mod styles;

use std::sync::Arc;

use atelier_core::repositories::{ClientRepository, StyleRepository, UserRepository};
use atelier_core::services::oauth::OAuthProvider;
use atelier_core::services::storage::ImageStorage;
use atelier_core::services::{
    AdminService, AuthService, ClientService, StyleService, TokenService,
};
use atelier_shared::config::Environment;

/// Shared application state handed to every handler.
///
/// Generic over the persistence and external-service implementations so the
/// binary can wire MySQL/Cloudinary/Google while tests wire in-memory
/// doubles against the exact same routing table.
pub struct AppState<U, C, S, O, I>
where
    U: UserRepository,
    C: ClientRepository,
    S: StyleRepository,
    O: OAuthProvider,
    I: ImageStorage,
{
    pub auth_service: Arc<AuthService<U, O>>,
    pub client_service: Arc<ClientService<C, S>>,
    pub style_service: Arc<StyleService<S, C, I>>,
    pub admin_service: Arc<AdminService<U, C, S>>,
    pub token_service: Arc<TokenService>,
    pub environment: Environment,

    /// Front-end origin the OAuth callback redirects back to.
    pub frontend_origin: String,
}
