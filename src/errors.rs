// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Comprehensive error enum for all possible failures
/// Each variant maps to appropriate HTTP status code and error response
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden access")]
    Forbidden,

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Payment provider error: {0}")]
    PaymentProviderError(String),

    #[error("Payment not completed: {0}")]
    PaymentFailed(String),
}

/// Convert BookingError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for BookingError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code) = match self {
            BookingError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            BookingError::AlreadyExists(_) => (StatusCode::CONFLICT, "ALREADY_EXISTS"),
            BookingError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR")
            }
            BookingError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            BookingError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            BookingError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            BookingError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            BookingError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            BookingError::PaymentProviderError(_) => {
                (StatusCode::BAD_GATEWAY, "PAYMENT_PROVIDER_ERROR")
            }
            BookingError::PaymentFailed(_) => {
                (StatusCode::PAYMENT_REQUIRED, "PAYMENT_NOT_COMPLETED")
            }
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::AlreadyExists(_) => StatusCode::CONFLICT,
            BookingError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BookingError::ValidationError(_) => StatusCode::BAD_REQUEST,
            BookingError::Unauthorized => StatusCode::UNAUTHORIZED,
            BookingError::Forbidden => StatusCode::FORBIDDEN,
            BookingError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BookingError::PaymentProviderError(_) => StatusCode::BAD_GATEWAY,
            BookingError::PaymentFailed(_) => StatusCode::PAYMENT_REQUIRED,
        }
    }
}
