/**
 * Backend Error Types
 *
 * `BackendError` is the single error type of the HTTP layer. Each variant
 * maps to exactly one status code:
 *
 * - `Validation` - 400, with optional field-level detail
 * - `Unauthorized` - 401
 * - `Forbidden` - 403
 * - `NotFound` - 404
 * - `Internal` - 500, the cause is logged and never sent to the client
 *
 * Lower layers (`SharedError`, `StoreError`, bcrypt, jsonwebtoken) convert
 * into it through `From`, so services can use `?` throughout.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::{FieldError, SharedError};

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Bad input. `errors` lists the offending fields, if any.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected failure. The string is the cause, for the server log only.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BackendError {
    /// A 400 without field detail
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// A 400 carrying field-level errors. The first field message becomes
    /// the top-level `message`.
    pub fn invalid_fields(errors: Vec<FieldError>) -> Self {
        let message = errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "Validation failed".to_string());
        Self::Validation { message, errors }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(cause: impl Into<String>) -> Self {
        Self::Internal(cause.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message that is safe to send to the client
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Unauthorized(message) | Self::Forbidden(message) | Self::NotFound(message) => {
                message.clone()
            }
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { .. } => Self::invalid_fields(vec![err.into()]),
            SharedError::SerializationError { message } => Self::bad_request(message),
        }
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => Self::Validation {
                message: "User already exists".to_string(),
                errors: vec![FieldError::new(field, "User already exists")],
            },
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("bcrypt: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for BackendError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Internal(format!("jwt: {}", err))
    }
}
