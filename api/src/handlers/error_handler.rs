//! Error normalization: one match from the domain taxonomy to HTTP.
//!
//! Every handler funnels failures through [`handle_domain_error`], so the
//! envelope shape and status mapping live in exactly one place. Rendering
//! depends on the environment selected at startup: development responses
//! carry the raw error as `detail`, production responses never leak
//! anything a non-operational error knows.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use log::{error, warn};

use atelier_core::errors::{AuthError, DomainError, TokenError};
use atelier_shared::config::Environment;
use atelier_shared::types::ErrorBody;

/// Renders a domain error as an HTTP response.
pub fn handle_domain_error(error: DomainError, environment: Environment) -> HttpResponse {
    let (status, message) = status_and_message(&error);

    if status.is_server_error() {
        error!("request failed: {error}");
    } else {
        warn!("request rejected ({status}): {error}");
    }

    let mut body = if status.is_server_error() {
        ErrorBody::error(message)
    } else {
        ErrorBody::fail(message)
    };

    if let Some(fields) = error.fields() {
        body = body.with_errors(fields.to_vec());
    }
    if environment.is_development() {
        body = body.with_detail(format!("{error:?}"));
    }

    HttpResponse::build(status).json(body)
}

fn status_and_message(error: &DomainError) -> (StatusCode, String) {
    match error {
        DomainError::BadRequest { .. } => (StatusCode::BAD_REQUEST, error.to_string()),
        DomainError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, error.to_string()),
        DomainError::Forbidden { .. } => (StatusCode::FORBIDDEN, error.to_string()),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error.to_string()),
        DomainError::Conflict { .. } => (StatusCode::CONFLICT, error.to_string()),
        DomainError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()),

        DomainError::Auth(auth) => match auth {
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, auth.to_string()),
            AuthError::EmailAlreadyRegistered { email } => (
                StatusCode::CONFLICT,
                format!("Duplicate field value: {email}. Please use another value."),
            ),
            AuthError::UnauthorizedDomain => (
                StatusCode::UNAUTHORIZED,
                "This email domain is not allowed to sign in".to_string(),
            ),
            AuthError::OAuthExchangeFailed => (
                StatusCode::UNAUTHORIZED,
                "Google sign-in failed. Please try again.".to_string(),
            ),
            AuthError::UserNotFound => (
                StatusCode::UNAUTHORIZED,
                "The user belonging to this token no longer exists".to_string(),
            ),
        },

        DomainError::Token(token) => match token {
            TokenError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "Your token has expired. Please log in again".to_string(),
            ),
            TokenError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid token. Please log in again".to_string(),
            ),
            TokenError::MissingRefreshToken => (
                StatusCode::UNAUTHORIZED,
                "No refresh token provided. Please log in".to_string(),
            ),
            TokenError::RefreshTokenMismatch => (
                StatusCode::FORBIDDEN,
                "Invalid refresh token. Please log in again".to_string(),
            ),
            TokenError::TokenGenerationFailed => generic_server_error(),
        },

        DomainError::Database { .. } | DomainError::Internal { .. } => generic_server_error(),
    }
}

fn generic_server_error() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Something went very wrong".to_string(),
    )
}
