use std::str::FromStr;

use serde::Deserialize;

use atelier_core::domain::entities::StyleCategory;
use atelier_core::errors::DomainError;
use atelier_core::services::styles::{StyleChanges, StyleDraft};
use atelier_shared::types::FieldError;

/// Text fields collected off the multipart style form.
///
/// Multipart carries everything as text, so validation happens here rather
/// than through the derive: create requires name and category, update
/// treats every field as optional.
#[derive(Debug, Clone, Default)]
pub struct StyleForm {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl StyleForm {
    pub fn set_field(&mut self, field: &str, value: String) {
        match field {
            "name" => self.name = Some(value),
            "category" => self.category = Some(value),
            "description" => self.description = Some(value),
            // Unknown text fields are ignored, matching lenient form handling
            _ => {}
        }
    }

    pub fn into_draft(self) -> Result<StyleDraft, DomainError> {
        let mut fields = Vec::new();

        let name = match self.name.filter(|n| !n.trim().is_empty()) {
            Some(name) => Some(name),
            None => {
                fields.push(FieldError::new("name", "Style name is required"));
                None
            }
        };

        let category = match self.category.as_deref() {
            None => {
                fields.push(FieldError::new("category", "Style category is required"));
                None
            }
            Some(raw) => match StyleCategory::from_str(raw) {
                Ok(category) => Some(category),
                Err(_) => {
                    fields.push(
                        FieldError::new("category", unknown_category_message()).with_value(raw),
                    );
                    None
                }
            },
        };

        match (name, category) {
            (Some(name), Some(category)) if fields.is_empty() => Ok(StyleDraft {
                name,
                category,
                description: self.description,
            }),
            _ => Err(DomainError::validation("Invalid input data", fields)),
        }
    }

    pub fn into_changes(self) -> Result<StyleChanges, DomainError> {
        let category = match self.category.as_deref() {
            None => None,
            Some(raw) => Some(StyleCategory::from_str(raw).map_err(|_| {
                DomainError::validation(
                    "Invalid input data",
                    vec![FieldError::new("category", unknown_category_message()).with_value(raw)],
                )
            })?),
        };

        Ok(StyleChanges {
            name: self.name,
            category,
            description: self.description,
        })
    }
}

/// Search filters for listing styles.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleSearchQuery {
    pub category: Option<String>,
    pub name: Option<String>,
}

impl StyleSearchQuery {
    pub fn parsed_category(&self) -> Result<Option<StyleCategory>, DomainError> {
        match self.category.as_deref() {
            None => Ok(None),
            Some(raw) => StyleCategory::from_str(raw).map(Some).map_err(|_| {
                DomainError::bad_request(format!("Invalid category: {raw}"))
            }),
        }
    }
}

fn unknown_category_message() -> String {
    let allowed = StyleCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Category must be one of: {allowed}")
}
