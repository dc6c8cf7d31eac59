//! Google implementation of the OAuth provider contract.
//!
//! The authorization code from the callback is exchanged at Google's token
//! endpoint, then the userinfo endpoint is queried with the resulting
//! access token. Any rejection along the way surfaces as a single
//! `OAuthExchangeFailed`; codes are single-use and expire within minutes,
//! so retrying with the same code never helps.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use atelier_core::domain::value_objects::ExternalProfile;
use atelier_core::errors::{AuthError, DomainError};
use atelier_core::services::oauth::OAuthProvider;
use atelier_shared::config::GoogleOAuthConfig;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

pub struct GoogleOAuthProvider {
    config: GoogleOAuthConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

impl GoogleOAuthProvider {
    pub fn new(config: GoogleOAuthConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn exchange_failed(detail: &str) -> DomainError {
        warn!(%detail, "oauth code exchange failed");
        DomainError::Auth(AuthError::OAuthExchangeFailed)
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthProvider {
    fn authorize_url(&self, state: &str) -> String {
        let url = reqwest::Url::parse_with_params(
            AUTH_URL,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
            ],
        )
        .expect("valid consent url");
        url.into()
    }

    async fn exchange_and_verify(&self, code: &str) -> Result<ExternalProfile, DomainError> {
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", &self.config.client_id),
                ("client_secret", &self.config.client_secret),
                ("redirect_uri", &self.config.redirect_url),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| Self::exchange_failed(&e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::exchange_failed(&format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Self::exchange_failed(&e.to_string()))?;

        let response = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| Self::exchange_failed(&e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::exchange_failed(&format!(
                "userinfo endpoint returned {}",
                response.status()
            )));
        }

        let info: UserInfo = response
            .json()
            .await
            .map_err(|e| Self::exchange_failed(&e.to_string()))?;

        debug!(sub = %info.sub, "oauth profile verified");
        Ok(ExternalProfile {
            provider_id: info.sub,
            display_name: info.name.unwrap_or_else(|| info.email.clone()),
            email: info.email,
            avatar_url: info.picture,
        })
    }
}
