//! MySQL repository implementations.

pub mod client_repository;
pub mod style_repository;
pub mod user_repository;

pub use client_repository::MySqlClientRepository;
pub use style_repository::MySqlStyleRepository;
pub use user_repository::MySqlUserRepository;

use atelier_core::errors::DomainError;

/// Maps an SQLx error to the domain taxonomy.
///
/// Unique-index violations become [`DomainError::Conflict`] carrying the
/// offending value; everything else is a non-operational database error.
pub(crate) fn map_sqlx_error(err: sqlx::Error, duplicate_value: &str) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DomainError::Conflict {
            message: format!("Duplicate field value: {duplicate_value}. Please use another value."),
        },
        _ => DomainError::Database {
            message: format!("Query failed: {err}"),
        },
    }
}

pub(crate) fn db_error(err: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Query failed: {err}"),
    }
}

pub(crate) fn column_error(column: &str, err: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Failed to read column {column}: {err}"),
    }
}
