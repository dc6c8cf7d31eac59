use actix_web::{web, HttpResponse};

use atelier_core::repositories::{ClientRepository, StyleRepository, UserRepository};
use atelier_core::services::oauth::OAuthProvider;
use atelier_core::services::storage::ImageStorage;

use crate::dto::auth_dto::UpdateProfileRequest;
use crate::dto::validate_request;
use crate::handlers::handle_domain_error;
use crate::middleware::AuthContext;
use crate::routes::AppState;

/// Handler for GET /api/v1/auth/profile
///
/// Returns the authenticated user's profile. The password hash and stored
/// refresh token never serialize.
pub async fn get_profile<U, C, S, O, I>(
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
    match state.auth_service.profile(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "data": { "user": user },
        })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}

/// Handler for PUT /api/v1/auth/profile
///
/// Updates the authenticated user's name, email and/or password, and
/// re-issues an access token reflecting the updated record.
///
/// # Errors
/// - 409 Conflict: new email already registered
/// - 422 Unprocessable Entity: empty name, malformed email, short password
pub async fn update_profile<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    if let Err(error) = validate_request(&request.0) {
        return handle_domain_error(error, state.environment);
    }

    let user = match state
        .auth_service
        .update_profile(
            auth.user_id,
            request.name.as_deref(),
            request.email.as_deref(),
            request.password.as_deref(),
        )
        .await
    {
        Ok(user) => user,
        Err(error) => return handle_domain_error(error, state.environment),
    };

    match state.token_service.issue_access_token(user.id, user.is_admin) {
        Ok(token) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "token": token,
            "data": { "user": user },
        })),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
