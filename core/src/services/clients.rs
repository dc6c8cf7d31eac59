//! Client management service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use atelier_shared::types::FieldError;
use atelier_shared::utils::validation::{normalize_email, not_blank, sanitize_text};

use crate::domain::entities::{Client, Measurement, Style};
use crate::errors::DomainError;
use crate::repositories::{ClientRepository, StyleRepository};

/// New-client payload after request validation.
#[derive(Debug, Clone, Default)]
pub struct ClientDraft {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub event_type: Option<String>,
    pub measurements: Vec<Measurement>,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ClientChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub event_type: Option<String>,
    pub measurements: Option<Vec<Measurement>>,
}

/// A client with its linked styles resolved to full records.
///
/// Links may dangle briefly while a style deletion is still detaching
/// references, so `styles` can be shorter than `client.style_ids`.
#[derive(Debug, Clone)]
pub struct ClientWithStyles {
    pub client: Client,
    pub styles: Vec<Style>,
}

/// CRUD and style-linking operations over client records.
///
/// Free-text fields are trimmed and HTML-escaped on the way in; what the
/// repository stores is already inert.
pub struct ClientService<C, S>
where
    C: ClientRepository,
    S: StyleRepository,
{
    client_repo: Arc<C>,
    style_repo: Arc<S>,
}

impl<C, S> ClientService<C, S>
where
    C: ClientRepository,
    S: StyleRepository,
{
    pub fn new(client_repo: Arc<C>, style_repo: Arc<S>) -> Self {
        Self {
            client_repo,
            style_repo,
        }
    }

    pub async fn create(&self, draft: ClientDraft) -> Result<Client, DomainError> {
        let mut client = Client::new(sanitize_text(&draft.name), draft.phone.trim().to_string());
        client.email = draft.email.as_deref().map(normalize_email);
        client.event_type = draft.event_type.as_deref().map(sanitize_text);
        client.measurements = sanitize_measurements(draft.measurements);

        let client = self.client_repo.create(client).await?;
        info!(client_id = %client.id, "client created");
        Ok(client)
    }

    pub async fn get(&self, id: Uuid) -> Result<ClientWithStyles, DomainError> {
        let client = self
            .client_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Client"))?;
        let styles = self.style_repo.find_by_ids(&client.style_ids).await?;
        Ok(ClientWithStyles { client, styles })
    }

    pub async fn search(
        &self,
        name: Option<&str>,
        event_type: Option<&str>,
    ) -> Result<Vec<Client>, DomainError> {
        self.client_repo.search(name, event_type).await
    }

    pub async fn update(&self, id: Uuid, changes: ClientChanges) -> Result<Client, DomainError> {
        let mut client = self
            .client_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Client"))?;

        if let Some(name) = changes.name {
            let cleaned = sanitize_text(&name);
            if cleaned.is_empty() {
                return Err(DomainError::validation(
                    "Invalid input data",
                    vec![FieldError::new("name", "Client name must not be empty")],
                ));
            }
            client.name = cleaned;
        }
        if let Some(phone) = changes.phone {
            client.phone = phone.trim().to_string();
        }
        // An explicit empty string clears an optional field
        if let Some(email) = changes.email {
            client.email = not_blank(&email).then(|| normalize_email(&email));
        }
        if let Some(event_type) = changes.event_type {
            let cleaned = sanitize_text(&event_type);
            client.event_type = (!cleaned.is_empty()).then_some(cleaned);
        }
        if let Some(measurements) = changes.measurements {
            client.measurements = sanitize_measurements(measurements);
        }
        client.updated_at = chrono::Utc::now();

        self.client_repo.update(client).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.client_repo.delete(id).await? {
            return Err(DomainError::not_found("Client"));
        }
        info!(client_id = %id, "client deleted");
        Ok(())
    }

    /// Links a style to a client. Linking the same style twice is a
    /// conflict, not a silent no-op, so callers learn their view is stale.
    pub async fn link_style(
        &self,
        client_id: Uuid,
        style_id: Uuid,
    ) -> Result<ClientWithStyles, DomainError> {
        if self.style_repo.find_by_id(style_id).await?.is_none() {
            return Err(DomainError::not_found("Style"));
        }
        if self.client_repo.find_by_id(client_id).await?.is_none() {
            return Err(DomainError::not_found("Client"));
        }

        if !self.client_repo.link_style(client_id, style_id).await? {
            return Err(DomainError::conflict(
                "Style is already linked to this client",
            ));
        }
        self.get(client_id).await
    }

    /// Removes a style reference from a client. Unlinking a style that is
    /// not linked is a no-op.
    pub async fn unlink_style(
        &self,
        client_id: Uuid,
        style_id: Uuid,
    ) -> Result<ClientWithStyles, DomainError> {
        let mut client = self
            .client_repo
            .find_by_id(client_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Client"))?;

        if client.has_style(style_id) {
            client.unlink_style(style_id);
            client = self.client_repo.update(client).await?;
        }

        let styles = self.style_repo.find_by_ids(&client.style_ids).await?;
        Ok(ClientWithStyles { client, styles })
    }
}

fn sanitize_measurements(measurements: Vec<Measurement>) -> Vec<Measurement> {
    measurements
        .into_iter()
        .map(|m| Measurement {
            name: sanitize_text(&m.name),
            value: sanitize_text(&m.value),
        })
        .collect()
}
