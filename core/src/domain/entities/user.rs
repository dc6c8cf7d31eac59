//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// `password_hash` is absent for accounts created through Google OAuth;
/// after a successful registration at least one of `password_hash` and
/// `google_id` is always set. `refresh_token` holds the single currently
/// valid refresh token for rotation; overwriting it revokes any previously
/// issued one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Unique email, normalized to lowercase at write time
    pub email: String,

    /// Bcrypt hash of the password; never serialized to clients
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Google subject id for OAuth accounts
    pub google_id: Option<String>,

    /// Avatar image URI
    pub avatar_url: Option<String>,

    /// Whether the user may access admin endpoints
    pub is_admin: bool,

    /// Currently valid refresh token, if any
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a password-based user.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: Some(password_hash),
            google_id: None,
            avatar_url: None,
            is_admin: false,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a user from a verified external (Google) profile.
    pub fn from_google(
        name: String,
        email: String,
        google_id: String,
        avatar_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash: None,
            google_id: Some(google_id),
            avatar_url,
            is_admin: false,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the account can authenticate with a password.
    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// True when the account is linked to an external provider.
    pub fn is_oauth_account(&self) -> bool {
        self.google_id.is_some()
    }

    /// Replaces the password hash.
    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = Some(hash);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_password_and_no_provider() {
        let user = User::new(
            "Ada".to_string(),
            "ada@x.com".to_string(),
            "$2b$hash".to_string(),
        );

        assert!(user.has_password());
        assert!(!user.is_oauth_account());
        assert!(!user.is_admin);
        assert!(user.refresh_token.is_none());
    }

    #[test]
    fn google_user_has_provider_and_no_password() {
        let user = User::from_google(
            "Ada".to_string(),
            "ada@gmail.com".to_string(),
            "google-sub-123".to_string(),
            Some("https://example.com/a.png".to_string()),
        );

        assert!(!user.has_password());
        assert!(user.is_oauth_account());
        assert_eq!(user.google_id.as_deref(), Some("google-sub-123"));
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User::new(
            "Ada".to_string(),
            "ada@x.com".to_string(),
            "$2b$hash".to_string(),
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refreshToken").is_none());
        assert_eq!(json["isAdmin"], false);
    }
}
