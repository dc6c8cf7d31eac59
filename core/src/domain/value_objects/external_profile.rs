//! Verified profile returned by an external OAuth provider.

use serde::{Deserialize, Serialize};

/// Identity attributes confirmed by the provider after code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalProfile {
    /// Provider subject id (e.g. Google `sub`)
    pub provider_id: String,

    /// Verified email address
    pub email: String,

    /// Display name
    pub display_name: String,

    /// Avatar URI, when the provider supplies one
    pub avatar_url: Option<String>,
}
