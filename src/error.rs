use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::result::ApiResult;

pub type AppResult<T> = Result<T, AppError>;

/// Every failure the admin API can report.
///
/// `ResponseError` turns each variant into a failure envelope, so handlers
/// only need `?`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("account not found")]
    AccountNotFound,

    #[error("incorrect password")]
    PasswordMismatch,

    #[error("account is locked")]
    AccountLocked,

    #[error("username '{0}' already exists")]
    DuplicateUsername(String),

    #[error("employee {0} not found")]
    EmployeeNotFound(i64),

    #[error("invalid employee status {0}")]
    InvalidStatus(i32),

    #[error("{0}")]
    BadRequest(String),

    #[error("not logged in")]
    NotLoggedIn,

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AccountNotFound | AppError::PasswordMismatch | AppError::NotLoggedIn => {
                StatusCode::UNAUTHORIZED
            }
            AppError::AccountLocked => StatusCode::FORBIDDEN,
            AppError::DuplicateUsername(_) => StatusCode::CONFLICT,
            AppError::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidStatus(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Token(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        HttpResponse::build(status).json(ApiResult::<()>::error(self.to_string()))
    }
}
