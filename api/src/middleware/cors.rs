//! CORS configuration.
//!
//! The browser client sends the refresh cookie cross-origin, so responses
//! must name a concrete allowed origin and advertise credential support;
//! a wildcard origin would make the browser drop the cookie.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use atelier_shared::config::{Environment, ServerConfig};

pub fn create_cors(config: &ServerConfig, environment: Environment) -> Cors {
    let mut cors = Cors::default()
        .allowed_origin(&config.allowed_origin)
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .supports_credentials()
        .max_age(3600);

    if environment.is_development() {
        log::info!("CORS: also allowing localhost origins for development");
        cors = cors
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://127.0.0.1:3000");
    }

    cors
}
