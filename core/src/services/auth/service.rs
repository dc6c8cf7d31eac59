//! Authentication service implementation.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use atelier_shared::utils::validation::normalize_email;

use crate::domain::entities::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::UserRepository;
use crate::services::oauth::OAuthProvider;
use crate::services::password::{hash_password, verify_password};
use crate::services::token::TokenService;

use super::config::AuthConfig;

/// Orchestrates registration, login, OAuth sign-in and token refresh.
///
/// Every successful flow ends the same way: a fresh access/refresh pair is
/// issued and the refresh token is persisted on the user record, revoking
/// whatever refresh token was stored before. Exactly one refresh token per
/// user is valid at any time.
pub struct AuthService<U, O>
where
    U: UserRepository,
    O: OAuthProvider,
{
    user_repo: Arc<U>,
    oauth_provider: Arc<O>,
    token_service: Arc<TokenService>,
    config: AuthConfig,
}

impl<U, O> AuthService<U, O>
where
    U: UserRepository,
    O: OAuthProvider,
{
    pub fn new(
        user_repo: Arc<U>,
        oauth_provider: Arc<O>,
        token_service: Arc<TokenService>,
        config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            oauth_provider,
            token_service,
            config,
        }
    }

    /// Registers a password-based account and signs it in.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, DomainError> {
        let email = normalize_email(email);

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered {
                email,
            }));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .user_repo
            .create(User::new(name.trim().to_string(), email, password_hash))
            .await?;

        info!(user_id = %user.id, "user registered");
        self.sign_in(user).await
    }

    /// Authenticates with email and password.
    ///
    /// Unknown email, wrong password and OAuth-only accounts (no password
    /// hash) all fail with the same `InvalidCredentials` error so the
    /// response does not reveal which part was wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, DomainError> {
        let email = normalize_email(email);
        let user = self.user_repo.find_by_email(&email).await?;

        let user = match user {
            Some(user) if verify_password(password, user.password_hash.as_deref()) => user,
            _ => {
                warn!(%email, "login rejected");
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        self.sign_in(user).await
    }

    /// The provider consent URL to redirect the browser to.
    pub fn oauth_authorize_url(&self, state: &str) -> String {
        self.oauth_provider.authorize_url(state)
    }

    /// Completes an OAuth sign-in from the provider's callback code.
    ///
    /// Matches an existing account by provider subject id first, then by
    /// email (linking the provider to a previously password-registered
    /// account), and creates a new account when neither exists.
    pub async fn oauth_login(&self, code: &str) -> Result<AuthResponse, DomainError> {
        let profile = self.oauth_provider.exchange_and_verify(code).await?;
        let email = normalize_email(&profile.email);

        if let Some(domain) = &self.config.allowed_email_domain {
            let allowed = email
                .rsplit_once('@')
                .map(|(_, d)| d.eq_ignore_ascii_case(domain))
                .unwrap_or(false);
            if !allowed {
                warn!(%email, "oauth sign-in from unauthorized domain");
                return Err(DomainError::Auth(AuthError::UnauthorizedDomain));
            }
        }

        let user = match self
            .user_repo
            .find_by_google_id(&profile.provider_id)
            .await?
        {
            Some(user) => user,
            None => match self.user_repo.find_by_email(&email).await? {
                Some(mut user) => {
                    user.google_id = Some(profile.provider_id.clone());
                    if user.avatar_url.is_none() {
                        user.avatar_url = profile.avatar_url.clone();
                    }
                    self.user_repo.update(user).await?
                }
                None => {
                    let user = self
                        .user_repo
                        .create(User::from_google(
                            profile.display_name.clone(),
                            email,
                            profile.provider_id.clone(),
                            profile.avatar_url.clone(),
                        ))
                        .await?;
                    info!(user_id = %user.id, "user created via oauth");
                    user
                }
            },
        };

        self.sign_in(user).await
    }

    /// Rotates a refresh token: verifies the presented token, issues a new
    /// pair and atomically replaces the stored token.
    ///
    /// A presented token that was already rotated away (replay, or a lost
    /// race against a concurrent refresh) is rejected without issuing
    /// anything; the single conditional swap in the repository is what
    /// guarantees at most one winner.
    pub async fn refresh(&self, presented: &str) -> Result<AuthResponse, DomainError> {
        // A presented token that fails verification renders the same 403 as
        // a replayed one; 401 is reserved for the absent cookie.
        let claims = self
            .token_service
            .verify_refresh_token(presented)
            .map_err(|_| DomainError::Token(TokenError::RefreshTokenMismatch))?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::RefreshTokenMismatch))?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Token(TokenError::RefreshTokenMismatch))?;

        let tokens = self.token_service.issue_pair(user.id, user.is_admin)?;
        let swapped = self
            .user_repo
            .swap_refresh_token(user.id, Some(presented), Some(&tokens.refresh_token))
            .await?;

        if !swapped {
            warn!(user_id = %user.id, "refresh token replay rejected");
            return Err(DomainError::Token(TokenError::RefreshTokenMismatch));
        }

        Ok(AuthResponse::new(&user, tokens))
    }

    /// Revokes the stored refresh token, ending the session.
    pub async fn logout(&self, user_id: Uuid) -> Result<(), DomainError> {
        if let Some(user) = self.user_repo.find_by_id(user_id).await? {
            self.user_repo
                .swap_refresh_token(user.id, user.refresh_token.as_deref(), None)
                .await?;
        }
        Ok(())
    }

    /// Loads the authenticated user's profile.
    pub async fn profile(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    /// Updates the authenticated user's display name and/or password.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, DomainError> {
        let mut user = self.profile(user_id).await?;

        if let Some(name) = name {
            user.name = name.trim().to_string();
        }
        if let Some(email) = email {
            let email = normalize_email(email);
            if email != user.email {
                if self.user_repo.find_by_email(&email).await?.is_some() {
                    return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered {
                        email,
                    }));
                }
                user.email = email;
            }
        }
        if let Some(password) = password {
            user.set_password_hash(hash_password(password)?);
        }
        user.updated_at = chrono::Utc::now();

        self.user_repo.update(user).await
    }

    /// Issues a token pair and persists the refresh token, replacing any
    /// previously stored one.
    async fn sign_in(&self, user: User) -> Result<AuthResponse, DomainError> {
        let tokens = self.token_service.issue_pair(user.id, user.is_admin)?;
        self.user_repo
            .swap_refresh_token(user.id, user.refresh_token.as_deref(), Some(&tokens.refresh_token))
            .await?;
        Ok(AuthResponse::new(&user, tokens))
    }
}
