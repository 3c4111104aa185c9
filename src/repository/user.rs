use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AuthError;
use crate::crypto::{constant_time_eq, hash_token};

/// Authorization label carried on a user record and in every token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            other => Err(AuthError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

/// The single live token pair recorded for an identity.
///
/// Holds SHA-256 digests, never the bearer tokens themselves. After logout
/// both fields are empty strings and `updated_at` marks the revocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub current_access_token: String,
    pub current_refresh_token: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Record for a freshly issued pair.
    pub fn issued(access_token: &str, refresh_token: &str, at: DateTime<Utc>) -> Self {
        Self {
            current_access_token: hash_token(access_token),
            current_refresh_token: hash_token(refresh_token),
            updated_at: Some(at),
        }
    }

    /// Record written on logout: both tokens cleared.
    pub fn revoked(at: DateTime<Utc>) -> Self {
        Self {
            current_access_token: String::new(),
            current_refresh_token: String::new(),
            updated_at: Some(at),
        }
    }

    pub fn is_revoked(&self) -> bool {
        self.current_access_token.is_empty() && self.current_refresh_token.is_empty()
    }

    pub fn holds_access(&self, token: &str) -> bool {
        holds(&self.current_access_token, token)
    }

    pub fn holds_refresh(&self, token: &str) -> bool {
        holds(&self.current_refresh_token, token)
    }
}

fn holds(digest: &str, token: &str) -> bool {
    !digest.is_empty() && constant_time_eq(digest.as_bytes(), hash_token(token).as_bytes())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub role: Role,
    pub favourite_genres: Vec<String>,
    pub session: SessionRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
impl User {
    pub fn mock_from_email(email: &str) -> Self {
        let now = Utc::now();
        User {
            user_id: uuid::Uuid::new_v4().to_string(),
            email: email.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            hashed_password: "fakehashedpassword".to_owned(),
            role: Role::User,
            favourite_genres: vec![],
            session: SessionRecord::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields supplied when registering an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub hashed_password: String,
    pub role: Role,
    pub favourite_genres: Vec<String>,
}

/// The external user store.
///
/// Every write is a single-document operation keyed by `user_id`; nothing
/// here spans two documents or takes a lock across calls.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, AuthError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, AuthError>;

    /// Unconditionally overwrites the session record of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::StoreRecordNotFound` if no record matched.
    async fn update_session(&self, user_id: &str, session: SessionRecord) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::StoreRecordNotFound` if no record matched.
    async fn update_role(&self, user_id: &str, role: Role) -> Result<User, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_session_record_holds_digests() {
        let record = SessionRecord::issued("access.jwt", "refresh.jwt", Utc::now());

        assert_ne!(record.current_access_token, "access.jwt");
        assert!(record.holds_access("access.jwt"));
        assert!(!record.holds_access("refresh.jwt"));
        assert!(record.holds_refresh("refresh.jwt"));
        assert!(!record.is_revoked());
    }

    #[test]
    fn test_revoked_record_holds_nothing() {
        let record = SessionRecord::revoked(Utc::now());

        assert!(record.is_revoked());
        assert!(record.updated_at.is_some());
        assert!(!record.holds_access(""));
        assert!(!record.holds_refresh(""));
    }

    #[test]
    fn test_password_not_serialized() {
        let user = User::mock_from_email("ada@example.com");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("hashed_password").is_none());
    }
}
