//! Password hashing and verification.
//!
//! Thin wrapper around bcrypt. Verification tolerates an absent hash
//! (OAuth-only accounts) by returning `false` instead of failing, so login
//! can report one uniform error for every credential failure shape.

use crate::errors::DomainError;

/// Hashes a plaintext password with bcrypt at the default cost.
///
/// Empty input is a caller bug surfaced as Bad-Request rather than an
/// opaque hash of the empty string.
pub fn hash_password(plaintext: &str) -> Result<String, DomainError> {
    if plaintext.is_empty() {
        return Err(DomainError::bad_request("Password must not be empty"));
    }
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)
        .map_err(|e| DomainError::internal(format!("Password hashing failed: {e}")))
}

/// Verifies a plaintext password against a stored hash.
///
/// Returns `false` for an absent hash, a malformed hash or a mismatch;
/// never errors.
pub fn verify_password(plaintext: &str, hash: Option<&str>) -> bool {
    match hash {
        Some(hash) => bcrypt::verify(plaintext, hash).unwrap_or(false),
        None => false,
    }
}
