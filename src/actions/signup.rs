use std::sync::Arc;

use crate::crypto::PasswordHasher;
use crate::session::SessionStore;
use crate::validators::email::normalize_email;
use crate::validators::{validate_email, validate_name, validate_password};
use crate::{AuthError, NewUser, Role, SecretString, User, UserRepository};

/// Registration input, before validation.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub favourite_genres: Vec<String>,
}

pub struct SignupAction<U: UserRepository> {
    store: SessionStore<U>,
    hasher: Arc<dyn PasswordHasher>,
}

impl<U: UserRepository> SignupAction<U> {
    pub fn new(store: SessionStore<U>, hasher: Arc<dyn PasswordHasher>) -> Self {
        SignupAction { store, hasher }
    }

    /// Registers a `USER` account.
    ///
    /// # Errors
    ///
    /// - `Validation` if any field is rejected
    /// - `UserAlreadyExists` if the email is taken
    #[tracing::instrument(name = "signup", skip_all, err)]
    pub async fn execute(&self, registration: Registration) -> Result<User, AuthError> {
        self.register(registration, Role::User).await
    }

    /// Registers an account with an explicit role. Only used to seed the
    /// bootstrap administrator.
    #[tracing::instrument(name = "signup_with_role", skip_all, fields(role = role.as_str()), err)]
    pub async fn register(&self, registration: Registration, role: Role) -> Result<User, AuthError> {
        let email = normalize_email(&registration.email);
        validate_email(&email)?;
        validate_password(registration.password.expose_secret())?;
        validate_name("first_name", &registration.first_name)?;
        validate_name("last_name", &registration.last_name)?;

        let hashed_password = self.hasher.hash(registration.password.expose_secret())?;

        let new_user = NewUser {
            email,
            first_name: registration.first_name.trim().to_owned(),
            last_name: registration.last_name.trim().to_owned(),
            hashed_password,
            role,
            favourite_genres: registration.favourite_genres,
        };

        let user = self
            .store
            .with_deadline("create_user", self.store.users().create_user(new_user))
            .await?;

        log::info!(
            target: "marquee_auth",
            "msg=\"signup success\", user_id=\"{}\", role=\"{}\"",
            user.user_id,
            user.role.as_str()
        );

        Ok(user)
    }

    /// Makes sure an ADMIN identity exists for `email`, registering it with
    /// `password` or promoting an existing account.
    #[tracing::instrument(name = "ensure_admin", skip_all, err)]
    pub async fn ensure_admin(&self, email: &str, password: &SecretString) -> Result<User, AuthError> {
        let registration = Registration {
            email: email.to_owned(),
            password: password.clone(),
            first_name: "Marquee".to_owned(),
            last_name: "Admin".to_owned(),
            favourite_genres: vec![],
        };

        match self.register(registration, Role::Admin).await {
            Err(AuthError::UserAlreadyExists) => {}
            other => return other,
        }

        let email = normalize_email(email);
        let existing = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if existing.is_admin() {
            return Ok(existing);
        }

        let promoted = self
            .store
            .with_deadline("update_role", self.store.users().update_role(&existing.user_id, Role::Admin))
            .await?;

        log::info!(
            target: "marquee_auth",
            "msg=\"bootstrap admin promoted\", user_id=\"{}\"",
            promoted.user_id
        );

        Ok(promoted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::{fast_hasher, registration, store};

    #[tokio::test]
    async fn test_signup_success() {
        let store = store();
        let signup = SignupAction::new(store.clone(), fast_hasher());

        let user = signup
            .execute(registration("  Ada@Example.com", "securepassword"))
            .await
            .unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, Role::User);
        assert_ne!(user.hashed_password, "securepassword");
        assert!(user.session.is_revoked());
        assert!(store.find_by_id(&user.user_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_signup_user_already_exists() {
        let signup = SignupAction::new(store(), fast_hasher());

        signup
            .execute(registration("ada@example.com", "securepassword"))
            .await
            .unwrap();

        let result = signup
            .execute(registration("ADA@example.com", "otherpassword"))
            .await;
        assert_eq!(result.unwrap_err(), AuthError::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let signup = SignupAction::new(store(), fast_hasher());

        let err = signup
            .execute(registration("not-an-email", "securepassword"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(ref msg) if msg.contains("email")));

        let err = signup
            .execute(registration("ada@example.com", "short"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(ref msg) if msg.contains("at least 8")));

        let mut nameless = registration("ada@example.com", "securepassword");
        nameless.first_name = " ".to_owned();
        let err = signup.execute(nameless).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(ref msg) if msg.contains("first_name")));
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let store = store();
        let signup = SignupAction::new(store.clone(), fast_hasher());
        let password = SecretString::new("rootpassword");

        let first = signup.ensure_admin("root@example.com", &password).await.unwrap();
        let second = signup.ensure_admin("root@example.com", &password).await.unwrap();

        assert!(first.is_admin());
        assert_eq!(first.user_id, second.user_id);
        assert_eq!(store.users().len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_admin_promotes_existing_user() {
        let signup = SignupAction::new(store(), fast_hasher());
        let user = signup
            .execute(registration("root@example.com", "securepassword"))
            .await
            .unwrap();

        let admin = signup
            .ensure_admin("root@example.com", &SecretString::new("ignoredpassword"))
            .await
            .unwrap();
        assert_eq!(admin.user_id, user.user_id);
        assert!(admin.is_admin());
    }

    #[tokio::test]
    async fn test_register_admin() {
        let signup = SignupAction::new(store(), fast_hasher());

        let user = signup
            .register(registration("root@example.com", "securepassword"), Role::Admin)
            .await
            .unwrap();
        assert!(user.is_admin());
    }
}
