//! User repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::DomainError;

/// Persistence contract for [`User`] entities.
///
/// Email lookups expect the address already normalized (trimmed,
/// lowercased); the store enforces email uniqueness with a unique index and
/// surfaces violations as [`DomainError::Conflict`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by external provider subject id.
    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user.
    ///
    /// Returns [`DomainError::Conflict`] when the email is already taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user.
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Atomically replace the stored refresh token, but only when the
    /// currently stored value equals `current`. Returns `true` when the
    /// swap happened; `false` means another rotation won the race or the
    /// presented token was already superseded.
    ///
    /// This is a single conditional update, not read-then-write, which is
    /// what makes refresh-token replay rejection safe under concurrency.
    async fn swap_refresh_token(
        &self,
        user_id: Uuid,
        current: Option<&str>,
        next: Option<&str>,
    ) -> Result<bool, DomainError>;

    /// List all users (admin surface).
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Total number of users.
    async fn count(&self) -> Result<u64, DomainError>;
}
