use serde::{Deserialize, Serialize};
use validator::Validate;

use atelier_core::domain::entities::Measurement;
use atelier_core::errors::DomainError;
use atelier_core::services::clients::{ClientChanges, ClientDraft};
use atelier_shared::types::FieldError;
use atelier_shared::utils::validation::{is_valid_email, is_valid_phone};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementDto {
    pub name: String,
    pub value: String,
}

impl From<MeasurementDto> for Measurement {
    fn from(dto: MeasurementDto) -> Self {
        Measurement {
            name: dto.name,
            value: dto.value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    #[validate(length(min = 1, message = "Client name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Client phone number is required"))]
    pub phone: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: Option<String>,
    pub event_type: Option<String>,
    #[serde(default)]
    pub measurements: Vec<MeasurementDto>,
}

impl CreateClientRequest {
    /// Shape check beyond the derive rules: the phone must look like a
    /// phone number, not just be non-empty.
    pub fn check_phone(&self) -> Result<(), DomainError> {
        check_phone_shape(&self.phone)
    }

    pub fn check_measurements(&self) -> Result<(), DomainError> {
        check_measurement_entries(&self.measurements)
    }

    pub fn into_draft(self) -> ClientDraft {
        ClientDraft {
            name: self.name,
            phone: self.phone,
            email: self.email,
            event_type: self.event_type,
            measurements: self.measurements.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    #[validate(length(min = 1, message = "Client name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Client phone number must not be empty"))]
    pub phone: Option<String>,
    // Not derive-checked: an explicit empty string clears the field
    pub email: Option<String>,
    pub event_type: Option<String>,
    pub measurements: Option<Vec<MeasurementDto>>,
}

impl UpdateClientRequest {
    pub fn check_phone(&self) -> Result<(), DomainError> {
        match &self.phone {
            Some(phone) => check_phone_shape(phone),
            None => Ok(()),
        }
    }

    /// A non-empty email must look like one; empty means "clear it".
    pub fn check_email(&self) -> Result<(), DomainError> {
        match self.email.as_deref() {
            Some(email) if !email.trim().is_empty() && !is_valid_email(email) => {
                Err(DomainError::validation(
                    "Invalid input data",
                    vec![
                        FieldError::new("email", "Please provide a valid email").with_value(email),
                    ],
                ))
            }
            _ => Ok(()),
        }
    }

    pub fn check_measurements(&self) -> Result<(), DomainError> {
        match &self.measurements {
            Some(measurements) => check_measurement_entries(measurements),
            None => Ok(()),
        }
    }

    pub fn into_changes(self) -> ClientChanges {
        ClientChanges {
            name: self.name,
            phone: self.phone,
            email: self.email,
            event_type: self.event_type,
            measurements: self
                .measurements
                .map(|m| m.into_iter().map(Into::into).collect()),
        }
    }
}

/// Search filters for listing clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSearchQuery {
    pub name: Option<String>,
    pub event_type: Option<String>,
}

/// Body of `POST /clients/{id}/styles`, naming the style to link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStyleRequest {
    pub style_id: String,
}

fn check_measurement_entries(measurements: &[MeasurementDto]) -> Result<(), DomainError> {
    for entry in measurements {
        if entry.name.trim().is_empty() || entry.value.trim().is_empty() {
            return Err(DomainError::validation(
                "Invalid input data",
                vec![FieldError::new(
                    "measurements",
                    "Each measurement needs a name and a value",
                )],
            ));
        }
    }
    Ok(())
}

fn check_phone_shape(phone: &str) -> Result<(), DomainError> {
    if is_valid_phone(phone) {
        return Ok(());
    }
    Err(DomainError::validation(
        "Invalid input data",
        vec![
            FieldError::new("phone", "Please provide a valid phone number").with_value(phone),
        ],
    ))
}
