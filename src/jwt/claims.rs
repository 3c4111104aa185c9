use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repository::{Role, User};

/// Signing domain of a token.
///
/// Each domain has its own secret and expiry; the domain is also asserted in
/// the signed payload as `typ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenDomain {
    /// Short-lived token presented on every protected request.
    Access,
    /// Long-lived token exchanged for a new pair.
    Refresh,
}

impl TokenDomain {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// A fully resolved identity, always read from the store after
/// authentication and never taken from client input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            subject_id: user.user_id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
        }
    }
}

/// Claims embedded in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject, the stable identity key.
    pub sub: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub iss: String,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expires at (Unix seconds).
    pub exp: i64,
    /// Random token id; keeps two tokens minted in the same second distinct.
    pub jti: String,
    #[serde(rename = "typ")]
    pub domain: TokenDomain,
}

impl IdentityClaims {
    pub fn subject_id(&self) -> &str {
        &self.sub
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
