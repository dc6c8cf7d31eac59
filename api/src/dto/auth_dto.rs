use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use atelier_core::domain::value_objects::AuthResponse;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Please tell us your name"))]
    pub name: String,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Please provide your password"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Please provide a valid email"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// Query parameters Google appends to the callback redirect.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

/// Body of every successful auth response. The refresh token travels only
/// in the http-only cookie, never in the JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseBody {
    pub status: String,
    pub token: String,
    pub expires_in: i64,
    pub data: AuthResponseData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponseData {
    pub user: UserSummary,
}

impl AuthResponseBody {
    pub fn from_domain(response: &AuthResponse) -> Self {
        Self {
            status: "success".to_string(),
            token: response.tokens.access_token.clone(),
            expires_in: response.tokens.access_expires_in,
            data: AuthResponseData {
                user: UserSummary {
                    id: response.user_id,
                    name: response.name.clone(),
                    email: response.email.clone(),
                    is_admin: response.is_admin,
                },
            },
        }
    }
}
