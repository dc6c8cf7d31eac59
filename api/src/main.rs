use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, App, HttpServer};
use dotenvy::dotenv;
use log::info;

use atelier_api::app::configure_api;
use atelier_api::middleware::cors::create_cors;
use atelier_api::routes::AppState;
use atelier_core::services::auth::AuthConfig;
use atelier_core::services::{AdminService, AuthService, ClientService, StyleService, TokenService};
use atelier_infra::{
    create_pool, CloudinaryStorage, GoogleOAuthProvider, MySqlClientRepository,
    MySqlStyleRepository, MySqlUserRepository,
};
use atelier_shared::config::{
    CloudinaryConfig, DatabaseConfig, Environment, GoogleOAuthConfig, JwtConfig, ServerConfig,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Atelier API server");

    // Load configuration
    let environment = Environment::from_env();
    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();
    let jwt_config = JwtConfig::from_env();
    let oauth_config = GoogleOAuthConfig::from_env();
    let cloudinary_config = CloudinaryConfig::from_env();

    info!("Environment: {environment}");

    let pool = create_pool(&database_config)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    info!("Connected to database");

    // Repositories
    let user_repo = Arc::new(MySqlUserRepository::new(pool.clone()));
    let client_repo = Arc::new(MySqlClientRepository::new(pool.clone()));
    let style_repo = Arc::new(MySqlStyleRepository::new(pool.clone()));

    // External services
    let oauth_provider = Arc::new(GoogleOAuthProvider::new(oauth_config.clone()));
    let storage = Arc::new(CloudinaryStorage::new(cloudinary_config));

    // Domain services
    let token_service = Arc::new(TokenService::new(jwt_config.into()));
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        oauth_provider,
        token_service.clone(),
        AuthConfig::new(oauth_config.allowed_domain),
    ));
    let client_service = Arc::new(ClientService::new(client_repo.clone(), style_repo.clone()));
    let style_service = Arc::new(StyleService::new(
        style_repo.clone(),
        client_repo.clone(),
        storage,
    ));
    let admin_service = Arc::new(AdminService::new(user_repo, client_repo, style_repo));

    let app_state = actix_web::web::Data::new(AppState {
        auth_service,
        client_service,
        style_service,
        admin_service,
        token_service,
        environment,
        frontend_origin: server_config.frontend_origin.clone(),
    });

    let bind_address = server_config.bind_address();
    info!("Server listening on {bind_address}");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors(&server_config, environment))
            .configure(configure_api(app_state.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
