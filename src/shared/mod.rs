//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the desktop client and the backend. These types define the JSON bodies of
//! the REST API and the validation rules both sides apply to them.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. All wire types are serde-serializable
//! with camelCase field names.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Field validators
pub mod validation;

/// Skip/limit pagination
pub mod pagination;

/// Authentication request/response bodies
pub mod auth;

/// User wire types
pub mod user;

/// Poem wire types
pub mod poem;

/// Re-export commonly used types for convenience
pub use error::{FieldError, SharedError};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use pagination::{PageRequest, Pagination};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use user::{FollowResponse, Profile, UpdateProfileRequest, UserSummary, UserView};
pub use poem::{
    AuthorProfile, AuthorSummary, Category, CommentRequest, CommentView, CreatePoemRequest,
    LikeResponse, LikeView, MessageResponse, PoemListResponse, PoemView, UpdatePoemRequest,
};
