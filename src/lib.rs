//! Poetica - Main Library
//!
//! Poetica is a poetry-sharing community: users register, publish poems,
//! like and comment on them, and follow other poets. The crate contains the
//! REST API server and a native desktop client that consumes it.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between client and backend
//!   - Wire types for users, poems, auth and pagination
//!   - Field validators and error types
//!   - Client configuration
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, JWT authentication, request validation
//!   - Poem and user services
//!   - `Store` trait with PostgreSQL and in-memory implementations
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - HTTP API client with an explicit session
//!   - Listing, detail, dashboard, profile and form views
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend (Axum, bcrypt, jsonwebtoken, dotenv)
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use poetica::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Native Desktop App
//!
//! ```rust,no_run
//! use poetica::egui_app::PoeticaApp;
//!
//! let options = eframe::NativeOptions::default();
//! eframe::run_native(
//!     "Poetica",
//!     options,
//!     Box::new(|cc| Ok(Box::new(PoeticaApp::new(cc)))),
//! );
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// egui native desktop app
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
