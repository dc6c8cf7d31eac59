//! Style repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Style, StyleCategory};
use crate::errors::DomainError;

/// Persistence contract for [`Style`] entities.
#[async_trait]
pub trait StyleRepository: Send + Sync {
    /// Persist a new style.
    async fn create(&self, style: Style) -> Result<Style, DomainError>;

    /// Find a style by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Style>, DomainError>;

    /// Fetch styles for a set of ids, preserving the input order where the
    /// style still exists.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Style>, DomainError>;

    /// Filter by category and/or case-insensitive name substring.
    async fn search(
        &self,
        category: Option<StyleCategory>,
        name: Option<&str>,
    ) -> Result<Vec<Style>, DomainError>;

    /// Update an existing style.
    async fn update(&self, style: Style) -> Result<Style, DomainError>;

    /// Delete a style. Returns `false` when no such style exists.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Total number of styles.
    async fn count(&self) -> Result<u64, DomainError>;
}
