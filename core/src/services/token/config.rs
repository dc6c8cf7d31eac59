//! Token service configuration.

use atelier_shared::config::JwtConfig;

/// Signing secrets and lifetimes for the two token classes.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret for signing access tokens
    pub access_secret: String,

    /// Secret for signing refresh tokens
    pub refresh_secret: String,

    /// Access token lifetime in seconds (≈15 minutes)
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds (≈7 days)
    pub refresh_token_expiry: i64,
}

impl From<JwtConfig> for TokenServiceConfig {
    fn from(config: JwtConfig) -> Self {
        Self {
            access_secret: config.access_secret,
            refresh_secret: config.refresh_secret,
            access_token_expiry: config.access_token_expiry,
            refresh_token_expiry: config.refresh_token_expiry,
        }
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        JwtConfig::default().into()
    }
}
