use actix_web::{web, HttpResponse};

use atelier_core::repositories::{ClientRepository, StyleRepository, UserRepository};
use atelier_core::services::oauth::OAuthProvider;
use atelier_core::services::storage::ImageStorage;

use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;
use crate::routes::auth::clear_refresh_cookie;
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the stored refresh token and expires the cookie. The access
/// token keeps working until its expiry; only the session's renewal path
/// is cut.
pub async fn logout<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    match state.auth_service.logout(auth.user_id).await {
        Ok(()) => HttpResponse::Ok()
            .cookie(clear_refresh_cookie())
            .json(serde_json::json!({ "status": "success" })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
