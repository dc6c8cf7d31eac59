//! Cloudinary implementation of the image storage contract.
//!
//! Uploads go to the account's configured folder through the signed upload
//! API; deletions use the destroy endpoint. Requests are authenticated with
//! an SHA-256 signature over the alphabetically ordered parameters plus the
//! API secret.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use atelier_core::errors::DomainError;
use atelier_core::services::storage::{ImageStorage, ImageUpload, StoredImage};
use atelier_shared::config::CloudinaryConfig;

pub struct CloudinaryStorage {
    config: CloudinaryConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

impl CloudinaryStorage {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/{action}",
            self.config.cloud_name
        )
    }

    /// Signs request parameters: parameters sorted by name, joined with
    /// `&`, with the API secret appended, hashed with SHA-256.
    fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
        let mut sorted: Vec<_> = params.to_vec();
        sorted.sort_by_key(|(name, _)| *name);

        let joined = sorted
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn upload_error(detail: impl Into<String>) -> DomainError {
        DomainError::Internal {
            message: format!("Image upload failed: {}", detail.into()),
        }
    }
}

#[async_trait]
impl ImageStorage for CloudinaryStorage {
    async fn upload(&self, upload: ImageUpload) -> Result<StoredImage, DomainError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = Self::sign(
            &[("folder", &self.config.folder), ("timestamp", &timestamp)],
            &self.config.api_secret,
        );

        let file_part = multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)
            .map_err(|e| Self::upload_error(e.to_string()))?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
            .text("folder", self.config.folder.clone());

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::upload_error(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Self::upload_error(format!("{status}: {body}")));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| Self::upload_error(e.to_string()))?;

        debug!(public_id = %parsed.public_id, "image uploaded");
        Ok(StoredImage {
            url: parsed.secure_url,
            public_id: parsed.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), DomainError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = Self::sign(
            &[("public_id", public_id), ("timestamp", &timestamp)],
            &self.config.api_secret,
        );

        let form = multipart::Form::new()
            .text("public_id", public_id.to_string())
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .http
            .post(self.endpoint("destroy"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Image deletion failed: {e}"),
            })?;

        let parsed: DestroyResponse = response.json().await.map_err(|e| DomainError::Internal {
            message: format!("Image deletion failed: {e}"),
        })?;

        // "not found" means the object is already gone, which is what the
        // caller wanted anyway.
        if parsed.result != "ok" && parsed.result != "not found" {
            warn!(%public_id, result = %parsed.result, "unexpected destroy result");
            return Err(DomainError::Internal {
                message: format!("Image deletion failed: {}", parsed.result),
            });
        }
        Ok(())
    }
}
