use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::AuthError;
use crate::api::ErrorResponse;

/// converts `AuthError` into appropriate HTTP responses
#[derive(Debug)]
pub struct AppError(pub AuthError);

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AuthError::MalformedToken
            | AuthError::BadSignature
            | AuthError::UnexpectedAlgorithm
            | AuthError::Expired
            | AuthError::WrongTokenDomain
            | AuthError::Unauthorized
            | AuthError::SessionNotCurrent
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::UserNotFound | AuthError::MovieNotFound => StatusCode::NOT_FOUND,
            AuthError::UserAlreadyExists | AuthError::MovieAlreadyExists => StatusCode::CONFLICT,
            AuthError::MissingIdentityContext
            | AuthError::PasswordHashError
            | AuthError::StoreUnavailable(_)
            | AuthError::StoreRecordNotFound
            | AuthError::IssuanceFailure(_)
            | AuthError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            log::error!(
                target: "marquee_auth",
                "msg=\"request failed\", reason=\"{}\", error=\"{}\"",
                self.0.reason(),
                self.0
            );
        }

        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError(AuthError::Expired).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError(AuthError::SessionNotCurrent).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError(AuthError::Forbidden).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError(AuthError::UserAlreadyExists).status(), StatusCode::CONFLICT);
        assert_eq!(AppError(AuthError::MovieAlreadyExists).status(), StatusCode::CONFLICT);
        assert_eq!(AppError(AuthError::MovieNotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError(AuthError::StoreRecordNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError(AuthError::MissingIdentityContext).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
