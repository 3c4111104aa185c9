use serde::{Deserialize, Serialize};

use crate::{AuthError, Movie, Role, SecretString, User};

// Request DTOs

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub favourite_genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub admin_review: String,
}

// Response DTOs

/// Public profile. Never carries tokens or the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub favourite_genres: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            favourite_genres: user.favourite_genres,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub ranking_name: String,
    pub admin_review: String,
}

impl From<Movie> for ReviewResponse {
    fn from(movie: Movie) -> Self {
        ReviewResponse {
            ranking_name: movie.ranking.ranking_name,
            admin_review: movie.admin_review,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Client-facing rendering of an error.
///
/// Token validation detail, store failures and other internals collapse to
/// generic messages; the specific reason is only ever logged.
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let (error, code) = match err {
            AuthError::MalformedToken
            | AuthError::BadSignature
            | AuthError::UnexpectedAlgorithm
            | AuthError::Expired
            | AuthError::WrongTokenDomain
            | AuthError::Unauthorized
            | AuthError::SessionNotCurrent => ("unauthorized".to_owned(), "UNAUTHORIZED"),
            AuthError::InvalidCredentials => (err.to_string(), "INVALID_CREDENTIALS"),
            AuthError::Forbidden => ("forbidden".to_owned(), "FORBIDDEN"),
            AuthError::UserNotFound => (err.to_string(), "USER_NOT_FOUND"),
            AuthError::UserAlreadyExists => (err.to_string(), "USER_ALREADY_EXISTS"),
            AuthError::MovieNotFound => (err.to_string(), "MOVIE_NOT_FOUND"),
            AuthError::MovieAlreadyExists => (err.to_string(), "MOVIE_ALREADY_EXISTS"),
            AuthError::Validation(msg) => (msg, "VALIDATION_ERROR"),
            AuthError::MissingIdentityContext
            | AuthError::PasswordHashError
            | AuthError::StoreUnavailable(_)
            | AuthError::StoreRecordNotFound
            | AuthError::IssuanceFailure(_)
            | AuthError::ConfigurationError(_) => {
                ("internal server error".to_owned(), "INTERNAL_ERROR")
            }
        };

        ErrorResponse {
            error,
            code: code.to_owned(),
        }
    }
}
