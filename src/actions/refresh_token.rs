use std::sync::Arc;

use crate::jwt::{Identity, JwtService, TokenDomain, TokenPair};
use crate::session::SessionStore;
use crate::{AuthError, User, UserRepository};

/// Exchanges a refresh token for a brand-new pair.
///
/// The role and profile embedded in the new pair are always re-read from the
/// store, never copied from the presented token.
pub struct RefreshTokenAction<U: UserRepository> {
    store: SessionStore<U>,
    jwt: Arc<JwtService>,
    enforce_session_currency: bool,
}

impl<U: UserRepository> RefreshTokenAction<U> {
    pub fn new(store: SessionStore<U>, jwt: Arc<JwtService>) -> Self {
        RefreshTokenAction {
            store,
            jwt,
            enforce_session_currency: false,
        }
    }

    /// Additionally require the presented token to be the one currently
    /// recorded for the identity.
    #[must_use]
    pub fn enforce_session_currency(mut self, enforce: bool) -> Self {
        self.enforce_session_currency = enforce;
        self
    }

    /// # Errors
    ///
    /// - `Unauthorized` if the token fails validation or names an unknown
    ///   identity
    /// - `SessionNotCurrent` if currency is enforced and the token has been
    ///   superseded or logged out
    /// - `IssuanceFailure` if signing fails
    /// - store errors from the lookup or the session write; nothing has been
    ///   persisted in that case
    #[tracing::instrument(name = "refresh_token", skip_all, err)]
    pub async fn execute(&self, refresh_token: &str) -> Result<(User, TokenPair), AuthError> {
        let claims = self
            .jwt
            .validate(refresh_token, TokenDomain::Refresh)
            .map_err(|e| {
                log::warn!(
                    target: "marquee_auth",
                    "msg=\"refresh rejected\", reason=\"{}\"",
                    e.reason()
                );
                AuthError::Unauthorized
            })?;

        let Some(user) = self.store.find_by_id(claims.subject_id()).await? else {
            log::warn!(
                target: "marquee_auth",
                "msg=\"refresh rejected\", reason=\"unknown_subject\", user_id=\"{}\"",
                claims.subject_id()
            );
            return Err(AuthError::Unauthorized);
        };

        if self.enforce_session_currency && !user.session.holds_refresh(refresh_token) {
            log::warn!(
                target: "marquee_auth",
                "msg=\"refresh rejected\", reason=\"session_not_current\", user_id=\"{}\"",
                user.user_id
            );
            return Err(AuthError::SessionNotCurrent);
        }

        let pair = self.jwt.issue(&Identity::from(&user))?;
        self.store.persist(&user.user_id, &pair).await?;

        log::info!(
            target: "marquee_auth",
            "msg=\"refresh success\", user_id=\"{}\"",
            user.user_id
        );

        Ok((user, pair))
    }
}
