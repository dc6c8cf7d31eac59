//! Request and response DTOs.

pub mod auth_dto;
pub mod client_dto;
pub mod style_dto;

use atelier_core::errors::DomainError;
use atelier_shared::types::FieldError;
use uuid::Uuid;
use validator::Validate;

/// Runs derive-based validation and folds failures into the domain
/// taxonomy as a 422 with one entry per offending field.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), DomainError> {
    let Err(errors) = request.validate() else {
        return Ok(());
    };

    let mut fields = Vec::new();
    for (field, violations) in errors.field_errors() {
        for violation in violations {
            let message = violation
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {field}"));
            fields.push(FieldError::new(field.to_string(), message));
        }
    }
    fields.sort_by(|a, b| a.field.cmp(&b.field));

    Err(DomainError::validation("Invalid input data", fields))
}

/// Parses a path segment as a UUID. A malformed id is a client error that
/// names the rejected value, caught before any query runs.
pub fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::bad_request(format!("Invalid id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(email(message = "Please provide a valid email"))]
        email: String,
    }

    #[test]
    fn collects_one_entry_per_field() {
        let err = validate_request(&Probe {
            name: String::new(),
            email: "nope".to_string(),
        })
        .unwrap_err();

        let DomainError::Validation { fields, .. } = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "email");
        assert_eq!(fields[1].field, "name");
        assert_eq!(fields[1].message, "Name is required");
    }

    #[test]
    fn valid_input_passes() {
        assert!(validate_request(&Probe {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        })
        .is_ok());
    }

    #[test]
    fn malformed_id_is_a_bad_request() {
        let err = parse_id("not-a-uuid").unwrap_err();
        assert_eq!(err.to_string(), "Invalid id: not-a-uuid");

        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
