use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::client::ApiError;

/// Gateway-facing error. Every variant renders as `{"error": <message>}`
/// under its own status code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    // upstream answered, but not with something usable
    #[error("Bad Gateway: {0}")]
    BadGateway(String),
    // upstream could not be reached at all
    #[error("Service Unavailable: {0}")]
    Unavailable(String),
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: &'a str,
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg)
            | AppError::BadGateway(msg)
            | AppError::Unavailable(msg) => msg,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse { error: self.message() })
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation(msg) => AppError::BadRequest(msg),
            ApiError::SessionExpired => AppError::Unauthorized("Session expired".to_string()),
            ApiError::Status { status: 400 | 422, message } => AppError::BadRequest(message),
            ApiError::Status { status: 404, message } => AppError::NotFound(message),
            ApiError::Status { status: 409, message } => AppError::Conflict(message),
            ApiError::Transport(msg) => AppError::Unavailable(msg),
            other => AppError::BadGateway(other.to_string()),
        }
    }
}
