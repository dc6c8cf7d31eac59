//! External image storage (Cloudinary) configuration.

use serde::{Deserialize, Serialize};

/// Cloudinary account credentials and upload settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,

    /// Folder uploads are placed under
    #[serde(default = "default_folder")]
    pub folder: String,
}

impl CloudinaryConfig {
    pub fn from_env() -> Self {
        Self {
            cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME").unwrap_or_default(),
            api_key: std::env::var("CLOUDINARY_API_KEY").unwrap_or_default(),
            api_secret: std::env::var("CLOUDINARY_API_SECRET").unwrap_or_default(),
            folder: std::env::var("CLOUDINARY_FOLDER").unwrap_or_else(|_| default_folder()),
        }
    }
}

fn default_folder() -> String {
    String::from("fashion_styles")
}
