//! Transport of the token pair in HTTP cookies.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::jwt::{JwtService, TokenPair};

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

fn session_cookie(name: &'static str, value: String, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(max_age)
        .build()
}

fn max_age(expiry: chrono::Duration) -> time::Duration {
    time::Duration::seconds(expiry.num_seconds())
}

/// Adds both cookies, each with a max-age equal to its domain's expiry.
pub fn set_session_cookies(jar: CookieJar, pair: &TokenPair, jwt: &JwtService) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_COOKIE,
        pair.access_token.expose_secret().to_owned(),
        max_age(jwt.access_expiry()),
    ))
    .add(session_cookie(
        REFRESH_COOKIE,
        pair.refresh_token.expose_secret().to_owned(),
        max_age(jwt.refresh_expiry()),
    ))
}

/// Overwrites both cookies with empty values and `Max-Age=-1`.
pub fn clear_session_cookies(jar: CookieJar) -> CookieJar {
    jar.add(session_cookie(ACCESS_COOKIE, String::new(), time::Duration::seconds(-1)))
        .add(session_cookie(REFRESH_COOKIE, String::new(), time::Duration::seconds(-1)))
}

/// Value of a cookie, treating an empty value as absent.
pub fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}
