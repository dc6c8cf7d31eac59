//! Style entity: a reusable design or inspiration record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Enumerated style categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleCategory {
    Traditional,
    Wedding,
    Casual,
    Corporate,
    #[serde(rename = "Evening Wear")]
    EveningWear,
    Other,
}

impl StyleCategory {
    pub const ALL: [StyleCategory; 6] = [
        StyleCategory::Traditional,
        StyleCategory::Wedding,
        StyleCategory::Casual,
        StyleCategory::Corporate,
        StyleCategory::EveningWear,
        StyleCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleCategory::Traditional => "Traditional",
            StyleCategory::Wedding => "Wedding",
            StyleCategory::Casual => "Casual",
            StyleCategory::Corporate => "Corporate",
            StyleCategory::EveningWear => "Evening Wear",
            StyleCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Traditional" => Ok(StyleCategory::Traditional),
            "Wedding" => Ok(StyleCategory::Wedding),
            "Casual" => Ok(StyleCategory::Casual),
            "Corporate" => Ok(StyleCategory::Corporate),
            "Evening Wear" => Ok(StyleCategory::EveningWear),
            "Other" => Ok(StyleCategory::Other),
            other => Err(format!("unknown style category: {other}")),
        }
    }
}

/// A design record with an externally hosted image.
///
/// `image_url` and `image_public_id` are always set together; the public id
/// is what the external store needs to delete the image later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub id: Uuid,

    pub name: String,

    pub category: StyleCategory,

    /// Externally hosted image URI
    pub image_url: String,

    /// External-storage object identifier
    pub image_public_id: String,

    pub description: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Style {
    pub fn new(
        name: String,
        category: StyleCategory,
        image_url: String,
        image_public_id: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            category,
            image_url,
            image_public_id,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Swaps in a newly uploaded image, returning the previous public id so
    /// the caller can clean up the old object once the record is persisted.
    pub fn replace_image(&mut self, image_url: String, image_public_id: String) -> String {
        let old = std::mem::replace(&mut self.image_public_id, image_public_id);
        self.image_url = image_url;
        self.updated_at = Utc::now();
        old
    }
}
