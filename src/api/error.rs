use actix_web::{HttpResponse, ResponseError};
use std::fmt;
use tracing::{error, warn};

use crate::api::validation::ErrorResponse;
use crate::db::store::UserWriteError;

/// Service-level errors
#[derive(Debug)]
pub enum ServiceError {
    /// Count, fetch, aggregate or write against the store failed
    StoreFailure(sqlx::Error),

    /// Input that cannot be defaulted, or a forbidden mutation
    ValidationFailure(String),

    /// Nothing owned by the caller under that id
    NotFound(String),

    /// Missing or rejected credentials
    Unauthenticated(String),

    /// Too many register/login attempts from one client
    RateLimited(String),

    /// Hashing or token signing failed
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::StoreFailure(e) => write!(f, "Store error: {}", e),
            ServiceError::ValidationFailure(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ServiceError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            ServiceError::RateLimited(msg) => write!(f, "Rate limited: {}", msg),
            ServiceError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::StoreFailure(err)
    }
}

impl From<UserWriteError> for ServiceError {
    fn from(err: UserWriteError) -> Self {
        match err {
            UserWriteError::EmailTaken => {
                ServiceError::ValidationFailure("Email already in use".to_string())
            }
            UserWriteError::Store(e) => ServiceError::StoreFailure(e),
        }
    }
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::StoreFailure(e) => {
                error!("Store error: {}", e);
                HttpResponse::InternalServerError().json(ErrorResponse::message(
                    "Failed to process request",
                    "Database error occurred",
                ))
            }
            ServiceError::ValidationFailure(msg) => {
                warn!("Validation error: {}", msg);
                HttpResponse::BadRequest().json(ErrorResponse::message("Validation failed", msg))
            }
            ServiceError::NotFound(msg) => {
                warn!("Not found: {}", msg);
                HttpResponse::NotFound().json(ErrorResponse::message("Not found", msg))
            }
            ServiceError::Unauthenticated(msg) => {
                warn!("Unauthenticated request: {}", msg);
                HttpResponse::Unauthorized()
                    .json(ErrorResponse::message("Authentication invalid", msg))
            }
            ServiceError::RateLimited(msg) => {
                warn!("Rate limited: {}", msg);
                HttpResponse::TooManyRequests().json(ErrorResponse::message("Too many requests", msg))
            }
            ServiceError::Internal(msg) => {
                error!("Internal error: {}", msg);
                HttpResponse::InternalServerError().json(ErrorResponse::message(
                    "Failed to process request",
                    "Something went wrong, try again later",
                ))
            }
        }
    }
}
