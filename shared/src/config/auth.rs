//! Authentication configuration: JWT signing and Google OAuth.

use serde::{Deserialize, Serialize};

/// JWT signing configuration.
///
/// Access and refresh tokens are signed with independent secrets so that
/// leaking one class of key does not compromise the other.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret for access tokens
    pub access_secret: String,

    /// Secret for refresh tokens
    pub refresh_secret: String,

    /// Access token expiry in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from("access-secret-change-in-production"),
            refresh_secret: String::from("refresh-secret-change-in-production"),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
        }
    }
}

impl JwtConfig {
    /// Builds the configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_secret: std::env::var("JWT_ACCESS_SECRET").unwrap_or(defaults.access_secret),
            refresh_secret: std::env::var("JWT_REFRESH_SECRET").unwrap_or(defaults.refresh_secret),
            access_token_expiry: std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expiry),
            refresh_token_expiry: std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expiry),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }
}

/// Google OAuth client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,

    /// Redirect URL registered with Google for the callback endpoint
    pub redirect_url: String,

    /// When set, only accounts under this email domain may sign in.
    /// Deployment policy toggle, not a structural requirement.
    #[serde(default)]
    pub allowed_domain: Option<String>,
}

impl GoogleOAuthConfig {
    pub fn from_env() -> Self {
        Self {
            client_id: std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            client_secret: std::env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            redirect_url: std::env::var("GOOGLE_REDIRECT_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/v1/auth/google/callback".to_string()),
            allowed_domain: std::env::var("GOOGLE_ALLOWED_DOMAIN").ok().filter(|d| !d.is_empty()),
        }
    }
}
