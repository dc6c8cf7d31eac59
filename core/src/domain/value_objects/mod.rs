//! Value objects passed between services and the API layer.

pub mod auth_response;
pub mod external_profile;

pub use auth_response::AuthResponse;
pub use external_profile::ExternalProfile;
