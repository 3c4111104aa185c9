//! Credential and session lifecycle for the marquee catalog service, plus
//! the movie catalog it guards.
//!
//! Access and refresh tokens are HS256-signed JWTs minted in two independent
//! signing domains. The single live pair for an identity is recorded on its
//! user record; logout overwrites that record with empty values.

pub mod actions;
pub mod api;
pub mod catalog;
pub mod config;
pub mod crypto;
pub mod jwt;
pub mod repository;
pub mod secret;
pub mod session;
pub mod validators;

pub use config::ServiceConfig;
pub use repository::{
    Genre, InMemoryMovieRepository, InMemoryUserRepository, Movie, MovieRepository, NewUser,
    Ranking, Role, SessionRecord, User, UserRepository,
};
pub use secret::SecretString;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    // token validation
    #[error("token is malformed")]
    MalformedToken,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token uses an unexpected signing algorithm")]
    UnexpectedAlgorithm,
    #[error("token has expired")]
    Expired,
    #[error("token was issued for a different signing domain")]
    WrongTokenDomain,

    // transport-level authentication / authorization
    #[error("unauthorized")]
    Unauthorized,
    #[error("session is no longer current")]
    SessionNotCurrent,
    #[error("forbidden")]
    Forbidden,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("identity missing from request context")]
    MissingIdentityContext,

    // accounts
    #[error("user not found")]
    UserNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("failed to hash password")]
    PasswordHashError,

    // catalog
    #[error("movie not found")]
    MovieNotFound,
    #[error("movie already exists")]
    MovieAlreadyExists,

    // store
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("no store record matched")]
    StoreRecordNotFound,

    // issuance / configuration
    #[error("token issuance failed: {0}")]
    IssuanceFailure(String),
    #[error("configuration error: {0}")]
    ConfigurationError(String),
}

impl AuthError {
    /// True for every failure of [`jwt::JwtService::validate`].
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedToken
                | Self::BadSignature
                | Self::UnexpectedAlgorithm
                | Self::Expired
                | Self::WrongTokenDomain
        )
    }

    /// Short, stable reason used in server-side logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MalformedToken => "malformed",
            Self::BadSignature => "bad_signature",
            Self::UnexpectedAlgorithm => "unexpected_algorithm",
            Self::Expired => "expired",
            Self::WrongTokenDomain => "wrong_domain",
            Self::Unauthorized => "unauthorized",
            Self::SessionNotCurrent => "session_not_current",
            Self::Forbidden => "forbidden",
            Self::InvalidCredentials => "invalid_credentials",
            Self::MissingIdentityContext => "missing_identity_context",
            Self::UserNotFound => "user_not_found",
            Self::UserAlreadyExists => "user_already_exists",
            Self::Validation(_) => "validation",
            Self::PasswordHashError => "password_hash",
            Self::MovieNotFound => "movie_not_found",
            Self::MovieAlreadyExists => "movie_already_exists",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::StoreRecordNotFound => "store_record_not_found",
            Self::IssuanceFailure(_) => "issuance_failure",
            Self::ConfigurationError(_) => "configuration",
        }
    }
}
