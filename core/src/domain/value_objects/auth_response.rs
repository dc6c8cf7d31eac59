//! Result of a successful authentication flow.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{TokenPair, User};

/// What the auth service hands back to the API layer after register, login,
/// OAuth login or refresh: the user's public summary plus a token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub tokens: TokenPair,
}

impl AuthResponse {
    pub fn new(user: &User, tokens: TokenPair) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            tokens,
        }
    }
}
