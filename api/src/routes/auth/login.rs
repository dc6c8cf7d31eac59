use actix_web::{web, HttpResponse};

use atelier_core::repositories::{ClientRepository, StyleRepository, UserRepository};
use atelier_core::services::oauth::OAuthProvider;
use atelier_core::services::storage::ImageStorage;

use crate::dto::auth_dto::{AuthResponseBody, LoginRequest};
use crate::dto::validate_request;
use crate::handlers::handle_domain_error;
use crate::routes::auth::refresh_cookie;
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Authenticates with email and password. A successful login rotates the
/// stored refresh token, revoking any previously issued one.
///
/// # Errors
/// - 401 Unauthorized: unknown email, wrong password or OAuth-only account
/// - 422 Unprocessable Entity: malformed email or empty password
pub async fn login<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    request: web::Json<LoginRequest>,
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
        .login(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok()
            .cookie(refresh_cookie(
                &response.tokens.refresh_token,
                response.tokens.refresh_expires_in,
            ))
            .json(AuthResponseBody::from_domain(&response)),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
