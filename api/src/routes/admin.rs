//! Admin endpoints, gated on the token's admin claim.

use actix_web::{web, HttpResponse};

use atelier_core::repositories::{ClientRepository, StyleRepository, UserRepository};
use atelier_core::services::oauth::OAuthProvider;
use atelier_core::services::storage::ImageStorage;

use crate::handlers::handle_domain_error;
use crate::routes::AppState;

/// Handler for GET /api/v1/admin/stats
///
/// Record counts across users, clients and styles.
pub async fn stats<U, C, S, O, I>(state: web::Data<AppState<U, C, S, O, I>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    match state.admin_service.stats().await {
        Ok(stats) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "data": { "stats": stats },
        })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for GET /api/v1/admin/users
pub async fn list_users<U, C, S, O, I>(state: web::Data<AppState<U, C, S, O, I>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    match state.admin_service.list_users().await {
        Ok(users) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "results": users.len(),
            "data": { "users": users },
        })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
