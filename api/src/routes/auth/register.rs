use actix_web::{web, HttpResponse};

use atelier_core::repositories::{ClientRepository, StyleRepository, UserRepository};
use atelier_core::services::oauth::OAuthProvider;
use atelier_core::services::storage::ImageStorage;

use crate::dto::auth_dto::{AuthResponseBody, RegisterRequest};
use crate::dto::validate_request;
use crate::handlers::handle_domain_error;
use crate::routes::auth::refresh_cookie;
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates a password-based account and signs it in: responds 201 with the
/// access token in the body and the refresh token in the http-only cookie.
///
/// # Errors
/// - 409 Conflict: email already registered
/// - 422 Unprocessable Entity: missing name, invalid email or short password
pub async fn register<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    request: web::Json<RegisterRequest>,
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

    match state
        .auth_service
        .register(&request.name, &request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Created()
            .cookie(refresh_cookie(
                &response.tokens.refresh_token,
                response.tokens.refresh_expires_in,
            ))
            .json(AuthResponseBody::from_domain(&response)),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
