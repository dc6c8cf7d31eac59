//! Domain error taxonomy.
//!
//! A single tagged enum replaces the inheritance-based error hierarchy the
//! API grew out of: the normalizer in the API layer performs one match over
//! `DomainError` to pick a status code and render an envelope. Variants are
//! "operational" (expected, user-facing) except `Database` and `Internal`,
//! whose messages must never reach a production client.

mod types;

pub use types::{AuthError, TokenError};

use atelier_shared::types::FieldError;
use thiserror::Error;

/// Core domain errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or missing input detected by business logic
    #[error("{message}")]
    BadRequest { message: String },

    /// Missing or invalid credential
    #[error("{message}")]
    Unauthorized { message: String },

    /// Valid credential but insufficient privilege or stale refresh token
    #[error("{message}")]
    Forbidden { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Duplicate unique field
    #[error("{message}")]
    Conflict { message: String },

    /// Structured multi-field validation failure
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    /// Persistence-layer failure; detail is logged, never rendered
    #[error("Database error: {message}")]
    Database { message: String },

    /// Unexpected failure; detail is logged, never rendered
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridges to the specific error families
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        DomainError::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        DomainError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        DomainError::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>, fields: Vec<FieldError>) -> Self {
        DomainError::Validation {
            message: message.into(),
            fields,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Expected, user-facing failure as opposed to a programming defect.
    /// Non-operational errors render a generic message in production.
    pub fn is_operational(&self) -> bool {
        !matches!(
            self,
            DomainError::Database { .. }
                | DomainError::Internal { .. }
                | DomainError::Token(TokenError::TokenGenerationFailed)
        )
    }

    /// Field-level errors attached to this failure, if any.
    pub fn fields(&self) -> Option<&[FieldError]> {
        match self {
            DomainError::Validation { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }
}
