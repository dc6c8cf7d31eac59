//! External OAuth identity providers.

use async_trait::async_trait;

use crate::domain::value_objects::ExternalProfile;
use crate::errors::DomainError;

/// Exchanges authorization codes for verified external identities.
///
/// Implementations talk to the provider's token and userinfo endpoints;
/// callers only ever see a verified [`ExternalProfile`] or a failure.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// The URL to redirect the browser to for consent.
    fn authorize_url(&self, state: &str) -> String;

    /// Redeems an authorization code and returns the verified profile.
    ///
    /// Fails with `AuthError::OAuthExchangeFailed` when the code is stale,
    /// already used or otherwise rejected by the provider.
    async fn exchange_and_verify(&self, code: &str) -> Result<ExternalProfile, DomainError>;
}
