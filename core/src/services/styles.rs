//! Style catalogue service.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use atelier_shared::types::FieldError;
use atelier_shared::utils::validation::sanitize_text;

use crate::domain::entities::{Style, StyleCategory};
use crate::errors::DomainError;
use crate::repositories::{ClientRepository, StyleRepository};
use crate::services::storage::{ImageStorage, ImageUpload};

/// New-style payload after request validation; the image arrives
/// separately as the raw multipart upload.
#[derive(Debug, Clone)]
pub struct StyleDraft {
    pub name: String,
    pub category: StyleCategory,
    pub description: Option<String>,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct StyleChanges {
    pub name: Option<String>,
    pub category: Option<StyleCategory>,
    pub description: Option<String>,
}

/// CRUD over styles, keeping the database record and the externally hosted
/// image consistent.
///
/// The write order is always upload-then-persist: if persisting fails the
/// fresh upload is deleted again, so a style record never points at a
/// missing image and failed requests do not leak orphaned uploads. Deleting
/// stale images is best-effort; a failure is logged, never surfaced.
pub struct StyleService<S, C, I>
where
    S: StyleRepository,
    C: ClientRepository,
    I: ImageStorage,
{
    style_repo: Arc<S>,
    client_repo: Arc<C>,
    storage: Arc<I>,
}

impl<S, C, I> StyleService<S, C, I>
where
    S: StyleRepository,
    C: ClientRepository,
    I: ImageStorage,
{
    pub fn new(style_repo: Arc<S>, client_repo: Arc<C>, storage: Arc<I>) -> Self {
        Self {
            style_repo,
            client_repo,
            storage,
        }
    }

    pub async fn create(
        &self,
        draft: StyleDraft,
        image: ImageUpload,
    ) -> Result<Style, DomainError> {
        let stored = self.storage.upload(image).await?;

        let mut style = Style::new(
            sanitize_text(&draft.name),
            draft.category,
            stored.url,
            stored.public_id.clone(),
        );
        style.description = draft.description.as_deref().map(sanitize_text);

        match self.style_repo.create(style).await {
            Ok(style) => {
                info!(style_id = %style.id, "style created");
                Ok(style)
            }
            Err(err) => {
                self.discard_image(&stored.public_id).await;
                Err(err)
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Style, DomainError> {
        self.style_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Style"))
    }

    pub async fn search(
        &self,
        category: Option<StyleCategory>,
        name: Option<&str>,
    ) -> Result<Vec<Style>, DomainError> {
        self.style_repo.search(category, name).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: StyleChanges,
        new_image: Option<ImageUpload>,
    ) -> Result<Style, DomainError> {
        let mut style = self.get(id).await?;

        if let Some(name) = changes.name {
            let cleaned = sanitize_text(&name);
            if cleaned.is_empty() {
                return Err(DomainError::validation(
                    "Invalid input data",
                    vec![FieldError::new("name", "Style name must not be empty")],
                ));
            }
            style.name = cleaned;
        }
        if let Some(category) = changes.category {
            style.category = category;
        }
        // An explicit empty string clears the description
        if let Some(description) = changes.description {
            let cleaned = sanitize_text(&description);
            style.description = (!cleaned.is_empty()).then_some(cleaned);
        }
        style.updated_at = chrono::Utc::now();

        if let Some(image) = new_image {
            let stored = self.storage.upload(image).await?;
            let old_public_id = style.replace_image(stored.url, stored.public_id.clone());

            return match self.style_repo.update(style).await {
                Ok(updated) => {
                    self.discard_image(&old_public_id).await;
                    Ok(updated)
                }
                Err(err) => {
                    // The record still points at the old image; drop the
                    // upload that never got referenced.
                    self.discard_image(&stored.public_id).await;
                    Err(err)
                }
            };
        }

        self.style_repo.update(style).await
    }

    /// Deletes a style, detaches it from every client that linked it and
    /// removes the hosted image.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let style = self.get(id).await?;

        // Detach references before the row goes away, so the unlink count
        // is observed rather than pre-empted by the cascading delete.
        let detached = self.client_repo.unlink_style_everywhere(id).await?;

        if !self.style_repo.delete(id).await? {
            return Err(DomainError::not_found("Style"));
        }
        info!(style_id = %id, detached, "style deleted");

        self.discard_image(&style.image_public_id).await;
        Ok(())
    }

    async fn discard_image(&self, public_id: &str) {
        if let Err(err) = self.storage.delete(public_id).await {
            warn!(%public_id, %err, "failed to delete stored image");
        }
    }
}
