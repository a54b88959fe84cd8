//! HTTP error type shared by all handlers.
//!
//! Error responses carry the bare error message as a `text/plain` body, so
//! clients can match on strings such as `invalid zipcode`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::services::TemperatureError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// 400, the request could not be decoded.
    BadRequest { message: String },
    /// 404
    NotFound { message: String },
    /// 422, the request was decoded but its content is invalid.
    Unprocessable { message: String },
    /// 500
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Unprocessable {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Unprocessable { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl From<TemperatureError> for AppError {
    fn from(e: TemperatureError) -> Self {
        match e {
            TemperatureError::InvalidZipcode => AppError::unprocessable(e.to_string()),
            TemperatureError::NotFound => AppError::not_found(e.to_string()),
            TemperatureError::Cancelled => AppError::internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.message().to_owned()).into_response()
    }
}
