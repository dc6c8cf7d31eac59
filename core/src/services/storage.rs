//! Image storage abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A stored image as returned by the storage backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredImage {
    /// Public HTTPS URL serving the image
    pub url: String,

    /// Backend identifier used to delete or replace the image later
    pub public_id: String,
}

/// Raw upload payload taken off a multipart request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Hosts uploaded images and serves them by URL.
///
/// `delete` is best-effort by contract: callers deleting an image as
/// cleanup after a failed write log and swallow the error rather than
/// failing the whole request.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn upload(&self, upload: ImageUpload) -> Result<StoredImage, DomainError>;

    async fn delete(&self, public_id: &str) -> Result<(), DomainError>;
}
