//! Client entity: a customer of the studio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single named measurement, e.g. `Bust` / `34 inches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub name: String,
    pub value: String,
}

/// A customer record.
///
/// `name` and `phone` are mandatory and non-empty after trimming; a given
/// style id appears at most once in `style_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,

    pub name: String,

    pub phone: String,

    pub email: Option<String>,

    /// Occasion the client is being fitted for, e.g. "Wedding"
    pub event_type: Option<String>,

    /// Ordered measurement entries
    pub measurements: Vec<Measurement>,

    /// Linked style references
    pub style_ids: Vec<Uuid>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(name: String, phone: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            phone,
            email: None,
            event_type: None,
            measurements: Vec::new(),
            style_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Links a style, returning `false` when it is already linked.
    pub fn link_style(&mut self, style_id: Uuid) -> bool {
        if self.style_ids.contains(&style_id) {
            return false;
        }
        self.style_ids.push(style_id);
        self.updated_at = Utc::now();
        true
    }

    /// Removes a style reference if present.
    pub fn unlink_style(&mut self, style_id: Uuid) {
        let before = self.style_ids.len();
        self.style_ids.retain(|id| *id != style_id);
        if self.style_ids.len() != before {
            self.updated_at = Utc::now();
        }
    }

    pub fn has_style(&self, style_id: Uuid) -> bool {
        self.style_ids.contains(&style_id)
    }
}
