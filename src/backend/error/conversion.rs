/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers can return it directly.
 *
 * # Response Format
 *
 * ```json
 * { "message": "Poem not found" }
 * ```
 *
 * Validation failures add an `errors` array of `{field, message}`.
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::error::types::BackendError;
use crate::shared::FieldError;

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let BackendError::Internal(cause) = &self {
            tracing::error!("Internal server error: {}", cause);
        }

        let body = ErrorBody {
            message: self.public_message(),
            errors: match self {
                BackendError::Validation { errors, .. } => errors,
                _ => Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}
