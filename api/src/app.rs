//! Application routing table.
//!
//! [`configure_api`] registers the shared state, the `/api/v1` scopes with
//! their auth guards, and the fallback handlers. It is generic over the
//! state's implementations so the binary and the integration tests share
//! one routing table; the caller adds process-level middleware (logging,
//! CORS) when assembling the `App`.

use actix_web::{web, HttpRequest, HttpResponse};

use atelier_core::repositories::{ClientRepository, StyleRepository, UserRepository};
use atelier_core::services::oauth::OAuthProvider;
use atelier_core::services::storage::ImageStorage;
use atelier_shared::types::ErrorBody;

use crate::middleware::JwtAuth;
use crate::routes::auth::{
    google::{google_callback, google_redirect},
    login::login,
    logout::logout,
    profile::{get_profile, update_profile},
    refresh::refresh,
    register::register,
};
use crate::routes::{admin, clients, styles, AppState};

/// Builds the configuration function registering every route.
pub fn configure_api<U, C, S, O, I>(
    app_state: web::Data<AppState<U, C, S, O, I>>,
) -> impl FnOnce(&mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    C: ClientRepository + 'static,
    S: StyleRepository + 'static,
    O: OAuthProvider + 'static,
    I: ImageStorage + 'static,
{
    move |cfg: &mut web::ServiceConfig| {
        let environment = app_state.environment;
        let token_service = app_state.token_service.clone();
        let auth = || JwtAuth::new(token_service.clone(), environment);

        cfg.app_data(app_state.clone())
            // Health check endpoint
            .route("/health", web::get().to(health_check))
            // API v1 routes
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(register::<U, C, S, O, I>))
                            .route("/login", web::post().to(login::<U, C, S, O, I>))
                            .route("/google", web::get().to(google_redirect::<U, C, S, O, I>))
                            .route(
                                "/google/callback",
                                web::get().to(google_callback::<U, C, S, O, I>),
                            )
                            .route(
                                "/refresh-token",
                                web::post().to(refresh::<U, C, S, O, I>),
                            )
                            .route(
                                "/logout",
                                web::post().to(logout::<U, C, S, O, I>).wrap(auth()),
                            )
                            .route(
                                "/profile",
                                web::get().to(get_profile::<U, C, S, O, I>).wrap(auth()),
                            )
                            .route(
                                "/profile",
                                web::put().to(update_profile::<U, C, S, O, I>).wrap(auth()),
                            ),
                    )
                    .service(
                        web::scope("/clients")
                            .wrap(auth())
                            .route("", web::post().to(clients::create_client::<U, C, S, O, I>))
                            .route("", web::get().to(clients::list_clients::<U, C, S, O, I>))
                            .route(
                                "/{id}",
                                web::get().to(clients::get_client::<U, C, S, O, I>),
                            )
                            .route(
                                "/{id}",
                                web::put().to(clients::update_client::<U, C, S, O, I>),
                            )
                            .route(
                                "/{id}",
                                web::delete().to(clients::delete_client::<U, C, S, O, I>),
                            )
                            .route(
                                "/{id}/styles",
                                web::get().to(clients::list_client_styles::<U, C, S, O, I>),
                            )
                            .route(
                                "/{id}/styles",
                                web::post().to(clients::link_style::<U, C, S, O, I>),
                            )
                            .route(
                                "/{id}/styles/{style_id}",
                                web::delete().to(clients::unlink_style::<U, C, S, O, I>),
                            ),
                    )
                    .service(
                        web::scope("/styles")
                            .wrap(auth())
                            .route("", web::post().to(styles::create_style::<U, C, S, O, I>))
                            .route("", web::get().to(styles::list_styles::<U, C, S, O, I>))
                            .route("/{id}", web::get().to(styles::get_style::<U, C, S, O, I>))
                            .route(
                                "/{id}",
                                web::put().to(styles::update_style::<U, C, S, O, I>),
                            )
                            .route(
                                "/{id}",
                                web::delete().to(styles::delete_style::<U, C, S, O, I>),
                            ),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(auth().admin())
                            .route("/stats", web::get().to(admin::stats::<U, C, S, O, I>))
                            .route("/users", web::get().to(admin::list_users::<U, C, S, O, I>)),
                    ),
            )
            // Default 404 handler
            .default_service(web::route().to(not_found));
    }
}

/// Health check endpoint handler.
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "atelier-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default handler for unmatched routes.
async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::fail(format!(
        "Cannot find {} {} on this server",
        req.method(),
        req.path()
    )))
}
