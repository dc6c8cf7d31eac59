use actix_web::{web, HttpRequest, HttpResponse};

use atelier_core::errors::{DomainError, TokenError};
use atelier_core::repositories::{ClientRepository, StyleRepository, UserRepository};
use atelier_core::services::oauth::OAuthProvider;
use atelier_core::services::storage::ImageStorage;

use crate::dto::auth_dto::AuthResponseBody;
use crate::handlers::handle_domain_error;
use crate::routes::auth::{refresh_cookie, REFRESH_COOKIE};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/refresh-token
///
/// Rotates the refresh token presented in the cookie: a fresh pair is
/// issued, the cookie is replaced, and the presented token stops working.
/// Replaying a rotated-out token fails with 403 without issuing anything.
///
/// # Errors
/// - 401 Unauthorized: missing cookie
/// - 403 Forbidden: malformed or expired token, or one already rotated away
pub async fn refresh<U, C, S, O, I>(
    req: HttpRequest,
    state: web::Data<AppState<U, C, S, O, I>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    let Some(cookie) = req.cookie(REFRESH_COOKIE) else {
        return handle_domain_error(
            DomainError::Token(TokenError::MissingRefreshToken),
            state.environment,
        );
    };

    match state.auth_service.refresh(cookie.value()).await {
        Ok(response) => HttpResponse::Ok()
            .cookie(refresh_cookie(
                &response.tokens.refresh_token,
                response.tokens.refresh_expires_in,
            ))
            .json(AuthResponseBody::from_domain(&response)),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
