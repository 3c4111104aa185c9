mod cookies;
mod cors;
mod error;
mod handlers;
mod middleware;
mod routes;

pub use cookies::{
    ACCESS_COOKIE, REFRESH_COOKIE, clear_session_cookies, cookie_value, set_session_cookies,
};
pub use cors::session_cors;
pub use error::AppError;
pub use middleware::{SessionIdentity, require_session};
pub use routes::{AppState, SessionSettings, protected_routes, public_routes, router};
