//! HTTP server and CORS configuration.

use serde::{Deserialize, Serialize};

/// Server binding and origin settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Origin allowed to call the API (CORS)
    pub allowed_origin: String,

    /// Front-end origin used for post-OAuth redirects
    pub frontend_origin: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);
        let allowed_origin =
            std::env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let frontend_origin = std::env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| allowed_origin.clone());

        Self {
            host,
            port,
            allowed_origin,
            frontend_origin,
        }
    }

    /// Address suitable for `HttpServer::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            allowed_origin: "http://localhost:3000".to_string(),
            frontend_origin: "http://localhost:3000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_address_joins_host_and_port() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
