//! Authentication and token error types.
//!
//! These are the operational failure shapes the auth flows can produce.
//! The API layer maps each variant onto an HTTP status; messages here are
//! already safe to show to clients.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Uniform message for unknown email, missing hash and wrong password,
    /// so responses cannot be used to enumerate accounts.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered: {email}")]
    EmailAlreadyRegistered { email: String },

    #[error("Unauthorized domain")]
    UnauthorizedDomain,

    #[error("OAuth code exchange failed")]
    OAuthExchangeFailed,

    #[error("User not found")]
    UserNotFound,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("No refresh token")]
    MissingRefreshToken,

    /// Presented refresh token verified but does not match the stored one;
    /// replay of a rotated-out token lands here.
    #[error("Invalid refresh token")]
    RefreshTokenMismatch,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
