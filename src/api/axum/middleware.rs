use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use super::cookies::{ACCESS_COOKIE, cookie_value};
use super::error::AppError;
use super::routes::AppState;
use crate::jwt::TokenDomain;
use crate::{AuthError, Role, UserRepository};

/// Identity of the caller, placed in request extensions by
/// [`require_session`] and read back by handlers as an extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub subject_id: String,
    pub role: Role,
}

impl SessionIdentity {
    /// Role gate.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` if the caller does not hold `role`.
    pub fn require_role(&self, role: Role) -> Result<(), AuthError> {
        if self.role == role {
            return Ok(());
        }

        log::warn!(
            target: "marquee_auth",
            "msg=\"role check failed\", user_id=\"{}\", required=\"{}\", actual=\"{}\"",
            self.subject_id,
            role.as_str(),
            self.role.as_str()
        );
        Err(AuthError::Forbidden)
    }
}

/// Fails with `MissingIdentityContext` when used on a route that is not
/// behind [`require_session`].
impl<S> FromRequestParts<S> for SessionIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionIdentity>()
            .cloned()
            .ok_or(AppError(AuthError::MissingIdentityContext))
    }
}

/// Gate for protected routes.
///
/// Reads the access cookie, validates it in the access domain and injects a
/// [`SessionIdentity`]. Any failure short-circuits with 401 before the
/// handler runs; the specific reason is logged, never returned.
pub async fn require_session<U>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError>
where
    U: UserRepository + 'static,
{
    let Some(token) = cookie_value(&jar, ACCESS_COOKIE) else {
        log::debug!(target: "marquee_auth", "msg=\"session rejected\", reason=\"missing_cookie\"");
        return Err(AppError(AuthError::Unauthorized));
    };

    let claims = state
        .jwt
        .validate(&token, TokenDomain::Access)
        .map_err(|e| {
            log::warn!(
                target: "marquee_auth",
                "msg=\"session rejected\", reason=\"{}\"",
                e.reason()
            );
            AppError(AuthError::Unauthorized)
        })?;

    if state.settings.enforce_session_currency {
        let current = state
            .store
            .find_by_id(claims.subject_id())
            .await?
            .is_some_and(|user| user.session.holds_access(&token));

        if !current {
            log::warn!(
                target: "marquee_auth",
                "msg=\"session rejected\", reason=\"session_not_current\", user_id=\"{}\"",
                claims.subject_id()
            );
            return Err(AppError(AuthError::SessionNotCurrent));
        }
    }

    request.extensions_mut().insert(SessionIdentity {
        subject_id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(request).await)
}
