//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT issuer
pub const JWT_ISSUER: &str = "atelier";

/// Claims structure for JWT payload.
///
/// Both token classes share the shape; what distinguishes them is the
/// signing secret and lifetime, so an access token can never pass refresh
/// verification or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Whether the subject holds the admin flag
    #[serde(default)]
    pub is_admin: bool,
}

impl Claims {
    /// Creates claims for an access token with the given lifetime.
    pub fn new_access_token(user_id: Uuid, is_admin: bool, expiry_secs: i64) -> Self {
        Self::new(user_id, is_admin, expiry_secs)
    }

    /// Creates claims for a refresh token with the given lifetime.
    pub fn new_refresh_token(user_id: Uuid, expiry_secs: i64) -> Self {
        Self::new(user_id, false, expiry_secs)
    }

    fn new(user_id: Uuid, is_admin: bool, expiry_secs: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_secs);

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
            is_admin,
        }
    }

    /// Parses the subject back into a user id.
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Access/refresh token pair returned by the auth flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_claims_carry_admin_flag() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, true, 900);

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.iss, JWT_ISSUER);
        assert!(claims.is_admin);
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn refresh_claims_never_carry_admin_flag() {
        let claims = Claims::new_refresh_token(Uuid::new_v4(), 604800);
        assert!(!claims.is_admin);
    }

    #[test]
    fn user_id_parses_from_subject() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access_token(user_id, false, 900);
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn negative_expiry_is_expired() {
        let claims = Claims::new_access_token(Uuid::new_v4(), false, -60);
        assert!(claims.is_expired());
    }

    #[test]
    fn jti_is_unique_per_token() {
        let user_id = Uuid::new_v4();
        let a = Claims::new_access_token(user_id, false, 900);
        let b = Claims::new_access_token(user_id, false, 900);
        assert_ne!(a.jti, b.jti);
    }
}
