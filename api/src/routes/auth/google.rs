use actix_web::http::header;
use actix_web::{web, HttpResponse};
use uuid::Uuid;

use atelier_core::errors::{AuthError, DomainError};
use atelier_core::repositories::{ClientRepository, StyleRepository, UserRepository};
use atelier_core::services::oauth::OAuthProvider;
use atelier_core::services::storage::ImageStorage;

use crate::dto::auth_dto::OAuthCallbackQuery;
use crate::handlers::handle_domain_error;
use crate::routes::auth::refresh_cookie;
use crate::routes::AppState;

/// Handler for GET /api/v1/auth/google
///
/// Redirects the browser to Google's consent screen.
pub async fn google_redirect<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    let url = state
        .auth_service
        .oauth_authorize_url(&Uuid::new_v4().to_string());

    HttpResponse::Found()
        .insert_header((header::LOCATION, url))
        .finish()
}

/// Handler for GET /api/v1/auth/google/callback
///
/// Completes the OAuth flow from the provider's redirect: exchanges the
/// one-time code, signs the matched-or-created account in, sets the refresh
/// cookie and sends the browser back to the front-end origin. The front end
/// then calls `POST /auth/refresh-token` to obtain an access token.
///
/// # Errors
/// - 401 Unauthorized: denied consent, missing or stale code, or an email
///   outside the allowed domain
pub async fn google_callback<U, C, S, O, I>(
    state: web::Data<AppState<U, C, S, O, I>>,
    query: web::Query<OAuthCallbackQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    // Google reports denied consent through `error` instead of `code`
    let code = match (&query.code, &query.error) {
        (Some(code), _) => code.clone(),
        _ => {
            return handle_domain_error(
                DomainError::Auth(AuthError::OAuthExchangeFailed),
                state.environment,
            )
        }
    };

    match state.auth_service.oauth_login(&code).await {
        Ok(response) => HttpResponse::Found()
            .cookie(refresh_cookie(
                &response.tokens.refresh_token,
                response.tokens.refresh_expires_in,
            ))
            .insert_header((header::LOCATION, state.frontend_origin.clone()))
            .finish(),
        Err(error) => handle_domain_error(error, state.environment),
    }
}
