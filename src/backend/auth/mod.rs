//! Authentication Module
//!
//! Registration, login, logout and the current-user endpoint, plus the JWT
//! helpers the middleware relies on.
//!
//! # Architecture
//!
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for `/auth`
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Tokens are stateless HS256 JWTs with a configurable lifetime
//! - Invalid credentials return 401 without saying which part was wrong

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, logout, register};
