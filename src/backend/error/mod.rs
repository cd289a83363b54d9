//! Backend Error Module
//!
//! This module defines the error type returned by every HTTP handler and
//! service in the backend.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError` and conversions from lower layers
//! - **`conversion`** - `IntoResponse` implementation and the JSON error body
//!
//! # Response Format
//!
//! ```json
//! { "message": "Title is required", "errors": [{ "field": "title", "message": "Title is required" }] }
//! ```
//!
//! `errors` is only present on field-level validation failures. Internal
//! failures are logged server-side and answered with an opaque message.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use conversion::ErrorBody;
pub use types::BackendError;
