//! Users Module
//!
//! Profile management and follow relationships.
//!
//! - **`service`** - Store-facing operations returning wire views
//! - **`handlers`** - Axum handlers for `/users`

pub mod service;

pub mod handlers;
