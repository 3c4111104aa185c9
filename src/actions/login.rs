use std::sync::Arc;

use crate::crypto::PasswordHasher;
use crate::jwt::{Identity, JwtService, TokenPair};
use crate::session::SessionStore;
use crate::validators::email::normalize_email;
use crate::{AuthError, SecretString, User, UserRepository};

pub struct LoginAction<U: UserRepository> {
    store: SessionStore<U>,
    jwt: Arc<JwtService>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<U: UserRepository> LoginAction<U> {
    pub fn new(store: SessionStore<U>, jwt: Arc<JwtService>, hasher: Arc<dyn PasswordHasher>) -> Self {
        LoginAction { store, jwt, hasher }
    }

    /// Verifies credentials, mints a fresh pair and records it as the
    /// identity's single live session.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` for an unknown email or a wrong password,
    ///   without distinguishing the two
    /// - `IssuanceFailure` if signing fails
    /// - store errors from the lookup or the session write
    #[tracing::instrument(name = "login", skip_all, err)]
    pub async fn execute(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<(User, TokenPair), AuthError> {
        let email = normalize_email(email);
        let Some(user) = self.store.find_by_email(&email).await? else {
            // burn one hash so an unknown email costs the same as a wrong password
            let _ = self.hasher.hash(password.expose_secret());
            log::warn!(target: "marquee_auth", "msg=\"login failed\", reason=\"unknown_email\"");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify(password.expose_secret(), &user.hashed_password)?
        {
            log::warn!(
                target: "marquee_auth",
                "msg=\"login failed\", reason=\"wrong_password\", user_id=\"{}\"",
                user.user_id
            );
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.jwt.issue(&Identity::from(&user))?;
        self.store.persist(&user.user_id, &pair).await?;

        log::info!(
            target: "marquee_auth",
            "msg=\"login success\", user_id=\"{}\"",
            user.user_id
        );

        Ok((user, pair))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::{fast_hasher, jwt, registered, store};
    use crate::jwt::TokenDomain;

    #[tokio::test]
    async fn test_login_success_records_session() {
        let store = store();
        let user = registered(&store, "ada@example.com", "securepassword").await;
        let login = LoginAction::new(store.clone(), jwt(), fast_hasher());

        let (found, pair) = login
            .execute("ada@example.com", &SecretString::new("securepassword"))
            .await
            .unwrap();
        assert_eq!(found.user_id, user.user_id);

        let claims = jwt()
            .validate(pair.access_token.expose_secret(), TokenDomain::Access)
            .unwrap();
        assert_eq!(claims.subject_id(), user.user_id);
        assert_eq!(claims.email, "ada@example.com");

        let stored = store.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert!(stored.session.holds_access(pair.access_token.expose_secret()));
        assert!(stored.session.holds_refresh(pair.refresh_token.expose_secret()));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let store = store();
        registered(&store, "ada@example.com", "securepassword").await;
        let login = LoginAction::new(store, jwt(), fast_hasher());

        let wrong_password = login
            .execute("ada@example.com", &SecretString::new("wrongpassword"))
            .await
            .unwrap_err();
        let unknown_email = login
            .execute("nobody@example.com", &SecretString::new("securepassword"))
            .await
            .unwrap_err();

        assert_eq!(wrong_password, AuthError::InvalidCredentials);
        assert_eq!(unknown_email, wrong_password);
    }

    #[tokio::test]
    async fn test_second_login_replaces_session() {
        let store = store();
        let user = registered(&store, "ada@example.com", "securepassword").await;
        let login = LoginAction::new(store.clone(), jwt(), fast_hasher());
        let password = SecretString::new("securepassword");

        let (_, first) = login.execute("ada@example.com", &password).await.unwrap();
        let (_, second) = login.execute("ada@example.com", &password).await.unwrap();

        let stored = store.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert!(stored.session.holds_refresh(second.refresh_token.expose_secret()));
        assert!(!stored.session.holds_refresh(first.refresh_token.expose_secret()));
    }
}
