//! Authentication service configuration.

/// Policy knobs for the authentication flows.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// When set, OAuth sign-in is restricted to emails under this domain
    /// (compared case-insensitively against the part after `@`).
    pub allowed_email_domain: Option<String>,
}

impl AuthConfig {
    pub fn new(allowed_email_domain: Option<String>) -> Self {
        Self {
            allowed_email_domain,
        }
    }
}
