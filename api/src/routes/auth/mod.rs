//! Authentication endpoints: register, login, Google OAuth, refresh,
//! logout and the authenticated profile.

pub mod google;
pub mod login;
pub mod logout;
pub mod profile;
pub mod refresh;
pub mod register;

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};

/// Cookie carrying the refresh token. Http-only so scripts cannot read it;
/// `Strict` so the browser only attaches it to same-site requests.
pub const REFRESH_COOKIE: &str = "refreshToken";

pub(crate) fn refresh_cookie(token: &str, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

/// An expired empty cookie, replacing the stored one on logout.
pub(crate) fn clear_refresh_cookie() -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(0))
        .finish()
}
