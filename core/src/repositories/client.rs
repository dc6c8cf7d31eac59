//! Client repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Client;
use crate::errors::DomainError;

/// Persistence contract for [`Client`] entities.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Persist a new client.
    async fn create(&self, client: Client) -> Result<Client, DomainError>;

    /// Find a client by id, with linked style references populated.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, DomainError>;

    /// Case-insensitive substring search over name and event type.
    async fn search(
        &self,
        name: Option<&str>,
        event_type: Option<&str>,
    ) -> Result<Vec<Client>, DomainError>;

    /// Update an existing client. Style links missing from the record are
    /// removed; new links are only ever added through [`Self::link_style`].
    async fn update(&self, client: Client) -> Result<Client, DomainError>;

    /// Delete a client. Returns `false` when no such client exists.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Link a style to a client. Returns `false` when the style is already
    /// linked (at-most-once invariant, enforced by the store).
    async fn link_style(&self, client_id: Uuid, style_id: Uuid) -> Result<bool, DomainError>;

    /// Remove a style reference from every client that carries it,
    /// returning the number of clients touched.
    async fn unlink_style_everywhere(&self, style_id: Uuid) -> Result<u64, DomainError>;

    /// Total number of clients.
    async fn count(&self) -> Result<u64, DomainError>;
}
