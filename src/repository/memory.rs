//! In-memory user store.
//!
//! Suitable for development, testing, and single-instance deployments.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::AuthError;

use super::user::{NewUser, Role, SessionRecord, User, UserRepository};

/// Users keyed by `user_id`, behind a `RwLock`.
///
/// Everything is lost when the process restarts.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

fn poisoned<T>(_: T) -> AuthError {
    AuthError::StoreUnavailable("lock poisoned".to_owned())
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of users currently stored.
    pub fn len(&self) -> usize {
        self.users.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AuthError> {
        let mut users = self.users.write().map_err(poisoned)?;

        if users.values().any(|u| u.email == new_user.email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            user_id: Uuid::new_v4().to_string(),
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            hashed_password: new_user.hashed_password,
            role: new_user.role,
            favourite_genres: new_user.favourite_genres,
            session: SessionRecord::default(),
            created_at: now,
            updated_at: now,
        };

        users.insert(user.user_id.clone(), user.clone());
        drop(users);

        Ok(user)
    }

    async fn update_session(&self, user_id: &str, session: SessionRecord) -> Result<(), AuthError> {
        let mut users = self.users.write().map_err(poisoned)?;
        let user = users.get_mut(user_id).ok_or(AuthError::StoreRecordNotFound)?;

        user.updated_at = session.updated_at.unwrap_or_else(Utc::now);
        user.session = session;
        Ok(())
    }

    async fn update_role(&self, user_id: &str, role: Role) -> Result<User, AuthError> {
        let mut users = self.users.write().map_err(poisoned)?;
        let user = users.get_mut(user_id).ok_or(AuthError::StoreRecordNotFound)?;

        user.role = role;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            hashed_password: "hash".to_owned(),
            role: Role::User,
            favourite_genres: vec!["Drama".to_owned()],
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create_user(new_user("ada@example.com")).await.unwrap();

        assert!(Uuid::parse_str(&user.user_id).is_ok());
        assert!(user.session.is_revoked());

        let by_id = repo.find_user_by_id(&user.user_id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "ada@example.com");

        let by_email = repo.find_user_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.user_id, user.user_id);

        assert!(repo.find_user_by_id("nope").await.unwrap().is_none());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(new_user("ada@example.com")).await.unwrap();

        let err = repo.create_user(new_user("ada@example.com")).await.unwrap_err();
        assert_eq!(err, AuthError::UserAlreadyExists);
    }

    #[tokio::test]
    async fn test_update_session_overwrites() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create_user(new_user("ada@example.com")).await.unwrap();

        let first = SessionRecord::issued("a1", "r1", Utc::now());
        repo.update_session(&user.user_id, first).await.unwrap();

        let second = SessionRecord::issued("a2", "r2", Utc::now());
        repo.update_session(&user.user_id, second).await.unwrap();

        let stored = repo.find_user_by_id(&user.user_id).await.unwrap().unwrap();
        assert!(stored.session.holds_refresh("r2"));
        assert!(!stored.session.holds_refresh("r1"));
    }

    #[tokio::test]
    async fn test_update_missing_record() {
        let repo = InMemoryUserRepository::new();

        let err = repo
            .update_session("missing", SessionRecord::revoked(Utc::now()))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::StoreRecordNotFound);

        let err = repo.update_role("missing", Role::Admin).await.unwrap_err();
        assert_eq!(err, AuthError::StoreRecordNotFound);
    }

    #[tokio::test]
    async fn test_update_role() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create_user(new_user("ada@example.com")).await.unwrap();

        let updated = repo.update_role(&user.user_id, Role::Admin).await.unwrap();
        assert!(updated.is_admin());
    }
}
