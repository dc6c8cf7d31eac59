//! Token service implementation.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair, JWT_ISSUER};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies signed, time-bounded access and refresh tokens.
///
/// The two classes are signed with independent secrets, so tokens are not
/// interchangeable and leaking one secret does not expose the other. To the
/// rest of the system tokens are opaque bearer strings; only this service
/// decodes them.
pub struct TokenService {
    config: TokenServiceConfig,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        let access_encoding = EncodingKey::from_secret(config.access_secret.as_bytes());
        let access_decoding = DecodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_encoding = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // No clock slack: an expired token must fail deterministically.
        validation.leeway = 0;

        Self {
            config,
            access_encoding,
            access_decoding,
            refresh_encoding,
            refresh_decoding,
            validation,
        }
    }

    /// Issues a short-lived access token for the given subject.
    pub fn issue_access_token(&self, user_id: Uuid, is_admin: bool) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(user_id, is_admin, self.config.access_token_expiry);
        self.encode(&claims, &self.access_encoding)
    }

    /// Issues a long-lived refresh token for the given subject.
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let claims = Claims::new_refresh_token(user_id, self.config.refresh_token_expiry);
        self.encode(&claims, &self.refresh_encoding)
    }

    /// Issues a matched access/refresh pair.
    pub fn issue_pair(&self, user_id: Uuid, is_admin: bool) -> Result<TokenPair, DomainError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(user_id, is_admin)?,
            refresh_token: self.issue_refresh_token(user_id)?,
            access_expires_in: self.config.access_token_expiry,
            refresh_expires_in: self.config.refresh_token_expiry,
        })
    }

    /// Verifies an access token's signature and expiry.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        Self::decode_with(token, &self.access_decoding, &self.validation)
    }

    /// Verifies a refresh token's signature and expiry.
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        Self::decode_with(token, &self.refresh_decoding, &self.validation)
    }

    /// Refresh token lifetime in seconds; the cookie max-age mirrors this.
    pub fn refresh_token_expiry(&self) -> i64 {
        self.config.refresh_token_expiry
    }

    fn encode(&self, claims: &Claims, key: &EncodingKey) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    fn decode_with(
        token: &str,
        key: &DecodingKey,
        validation: &Validation,
    ) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, key, validation).map_err(|e| {
            if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                DomainError::Token(TokenError::TokenExpired)
            } else {
                DomainError::Token(TokenError::InvalidToken)
            }
        })?;
        Ok(data.claims)
    }
}
