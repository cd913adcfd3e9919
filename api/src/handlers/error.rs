//! Mapping of domain error kinds to HTTP responses.
//!
//! Every authentication failure kind maps 1:1 to a status code; the
//! infrastructure kind stays a 500 so clients can tell "not authenticated"
//! apart from "service unavailable".

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use md_core::errors::{AccountError, DomainError, TokenError};

/// Wrapper carrying a domain error across the actix boundary.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Error body returned to clients
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

fn error_code(error: &DomainError) -> &'static str {
    match error {
        DomainError::Token(e) => match e {
            TokenError::TokenMissing => "TOKEN_MISSING",
            TokenError::TokenInvalid => "TOKEN_INVALID",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::RefreshTokenInvalid => "REFRESH_TOKEN_INVALID",
        },
        DomainError::Account(e) => match e {
            AccountError::UserNotExist => "USER_NOT_EXIST",
            AccountError::UserNotVerified => "USER_NOT_VERIFIED",
            AccountError::UserAlreadyVerified => "USER_ALREADY_VERIFIED",
            AccountError::ForbiddenAccess => "FORBIDDEN_ACCESS",
            AccountError::InvalidCredentials => "INVALID_CREDENTIALS",
            AccountError::UserAlreadyExists => "USER_ALREADY_EXISTS",
        },
        DomainError::Internal { .. } => "INTERNAL_ERROR",
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Token(_) => StatusCode::UNAUTHORIZED,
            DomainError::Account(e) => match e {
                AccountError::UserNotExist => StatusCode::NOT_FOUND,
                AccountError::UserNotVerified
                | AccountError::UserAlreadyVerified
                | AccountError::ForbiddenAccess => StatusCode::FORBIDDEN,
                AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AccountError::UserAlreadyExists => StatusCode::CONFLICT,
            },
            DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.0, DomainError::Internal { .. }) {
            tracing::error!(error = %self.0, "request failed with internal error");
        }

        let message = match &self.0 {
            // Storage details stay out of client responses.
            DomainError::Internal { .. } => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: error_code(&self.0),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::Token(TokenError::TokenMissing), 401),
            (DomainError::Token(TokenError::TokenExpired), 401),
            (DomainError::Token(TokenError::RefreshTokenInvalid), 401),
            (DomainError::Account(AccountError::UserNotExist), 404),
            (DomainError::Account(AccountError::UserNotVerified), 403),
            (DomainError::Account(AccountError::ForbiddenAccess), 403),
            (DomainError::Account(AccountError::InvalidCredentials), 401),
            (DomainError::Account(AccountError::UserAlreadyExists), 409),
            (DomainError::internal("db down"), 500),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError(error).status_code().as_u16(), status);
        }
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let response = ApiError(DomainError::internal("password for db is hunter2"))
            .error_response();
        assert_eq!(response.status().as_u16(), 500);
    }
}
