//! Backend Module
//!
//! The Poetica REST API: an Axum HTTP server over a document store.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, app creation
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Registration, login, JWT sessions
//! - **`middleware`** - Bearer-token authentication
//! - **`poems`** - Poem CRUD, likes and comments
//! - **`users`** - Profiles and follow relationships
//! - **`store`** - `Store` trait with PostgreSQL and in-memory implementations
//! - **`validation`** - Field-level request validation
//! - **`extract`** - JSON and query extractors with uniform rejections
//! - **`error`** - `BackendError` and its HTTP rendering
//!
//! # Request Flow
//!
//! ```text
//! client → router → [auth middleware] → handler (validation) → service → store
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use poetica::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Poem endpoints and service
pub mod poems;

/// User endpoints and service
pub mod users;

/// Persistence
pub mod store;

/// Request validation
pub mod validation;

/// Request extractors
pub mod extract;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use server::{app_with_store, create_app, AppState, ServerConfig};
pub use store::{MemoryStore, PgStore, Store};
