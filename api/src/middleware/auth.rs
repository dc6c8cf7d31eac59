//! JWT authentication middleware.
//!
//! Verifies the `Authorization: Bearer` access token on protected routes
//! and injects an [`AuthContext`] into request extensions. Failures are
//! rendered through the shared error normalizer so middleware rejections
//! wear the same envelope as handler errors. `JwtAuth::admin()` gates
//! admin-only scopes on the token's admin claim.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ErrorUnauthorized;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use atelier_core::domain::entities::Claims;
use atelier_core::errors::{DomainError, TokenError};
use atelier_core::services::token::TokenService;
use atelier_shared::config::Environment;

use crate::handlers::handle_domain_error;

/// Authenticated caller context, available to handlers via [`FromRequest`].
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub is_admin: bool,
    pub jti: String,
}

impl AuthContext {
    fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;
        Ok(Self {
            user_id,
            is_admin: claims.is_admin,
            jti: claims.jti,
        })
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));
        ready(result)
    }
}

/// Middleware factory for routes requiring a valid access token.
pub struct JwtAuth {
    token_service: Arc<TokenService>,
    environment: Environment,
    require_admin: bool,
}

impl JwtAuth {
    pub fn new(token_service: Arc<TokenService>, environment: Environment) -> Self {
        Self {
            token_service,
            environment,
            require_admin: false,
        }
    }

    /// Additionally requires the admin claim.
    pub fn admin(mut self) -> Self {
        self.require_admin = true;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
            environment: self.environment,
            require_admin: self.require_admin,
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
    environment: Environment,
    require_admin: bool,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = self.token_service.clone();
        let environment = self.environment;
        let require_admin = self.require_admin;

        Box::pin(async move {
            let context = authenticate(&req, &token_service).and_then(|ctx| {
                if require_admin && !ctx.is_admin {
                    return Err(DomainError::forbidden(
                        "You do not have permission to perform this action",
                    ));
                }
                Ok(ctx)
            });

            match context {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(error) => {
                    let response = handle_domain_error(error, environment);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

fn authenticate(
    req: &ServiceRequest,
    token_service: &TokenService,
) -> Result<AuthContext, DomainError> {
    let token = extract_bearer_token(req).ok_or_else(|| {
        DomainError::unauthorized("You are not logged in. Please log in to get access")
    })?;

    let claims = token_service.verify_access_token(&token)?;
    AuthContext::from_claims(claims)
}

fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}
