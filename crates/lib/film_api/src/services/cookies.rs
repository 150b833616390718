//! Cookie service: build and clear httpOnly auth cookies.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Cookie name for the access token.
pub const ACCESS_COOKIE: &str = "access_token";
/// Cookie name for the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// The refresh cookie is only sent to the auth endpoints.
const REFRESH_PATH: &str = "/auth";

fn build(
    name: &'static str,
    value: String,
    path: &'static str,
    same_site: SameSite,
    secure: bool,
    max_age: Duration,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(same_site)
        .path(path)
        .max_age(max_age)
        .build()
}

/// Build a httpOnly cookie for the access token.
pub fn access_cookie(token: &str, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    build(
        ACCESS_COOKIE,
        token.to_string(),
        "/",
        SameSite::Lax,
        secure,
        Duration::seconds(max_age_secs),
    )
}

/// Build a httpOnly, `SameSite=Strict` cookie for the refresh token.
pub fn refresh_cookie(token: &str, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    build(
        REFRESH_COOKIE,
        token.to_string(),
        REFRESH_PATH,
        SameSite::Strict,
        secure,
        Duration::seconds(max_age_secs),
    )
}

/// Build an expired access cookie to clear auth state.
pub fn clear_access_cookie(secure: bool) -> Cookie<'static> {
    build(ACCESS_COOKIE, String::new(), "/", SameSite::Lax, secure, Duration::ZERO)
}

/// Build an expired refresh cookie.
pub fn clear_refresh_cookie(secure: bool) -> Cookie<'static> {
    build(
        REFRESH_COOKIE,
        String::new(),
        REFRESH_PATH,
        SameSite::Strict,
        secure,
        Duration::ZERO,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_cookie_is_scoped_to_auth() {
        let c = refresh_cookie("secret", 60, true);
        assert_eq!(c.path(), Some("/auth"));
        assert_eq!(c.same_site(), Some(SameSite::Strict));
        assert_eq!(c.http_only(), Some(true));
        assert_eq!(c.secure(), Some(true));
    }

    #[test]
    fn access_cookie_covers_the_site() {
        let c = access_cookie("jwt", 900, false);
        assert_eq!(c.path(), Some("/"));
        assert_eq!(c.same_site(), Some(SameSite::Lax));
        assert_eq!(c.max_age(), Some(Duration::seconds(900)));
    }

    #[test]
    fn cleared_cookies_expire_immediately() {
        assert_eq!(clear_access_cookie(false).max_age(), Some(Duration::ZERO));
        assert_eq!(clear_refresh_cookie(false).value(), "");
    }
}
