//! Poems Module
//!
//! Poem CRUD, likes and comments.
//!
//! - **`service`** - Store-facing operations, authorization, population
//! - **`handlers`** - Axum handlers for `/poems`

pub mod service;

pub mod handlers;
