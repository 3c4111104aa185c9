//! Input validation for registration, login and catalog payloads.

pub mod email;
pub mod movie;
pub mod name;
pub mod password;

pub use email::validate_email;
pub use movie::validate_movie;
pub use name::validate_name;
pub use password::validate_password;

use thiserror::Error;

use crate::AuthError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email cannot be empty")]
    EmailEmpty,
    #[error("email is too long (max 254 characters)")]
    EmailTooLong,
    #[error("invalid email format")]
    EmailInvalidFormat,
    #[error("password cannot be empty")]
    PasswordEmpty,
    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("password is too long (max {0} characters)")]
    PasswordTooLong(usize),
    #[error("{0} cannot be empty")]
    NameEmpty(&'static str),
    #[error("{0} is too long (max 100 characters)")]
    NameTooLong(&'static str),
    #[error("{0} is required")]
    FieldRequired(&'static str),
    #[error("title must be between 2 and 500 characters")]
    TitleLength,
    #[error("poster_path must be an http(s) URL")]
    PosterPathInvalid,
    #[error("at least one genre is required")]
    GenresEmpty,
    #[error("genre_name must be between 2 and 100 characters")]
    GenreNameLength,
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        AuthError::Validation(err.to_string())
    }
}
