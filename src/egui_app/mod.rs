//! egui Native Desktop App Module
//!
//! A native desktop client for the Poetica API built with egui/eframe.
//!
//! # Architecture
//!
//! The egui_app module is organized into focused submodules:
//!
//! - **`config`** - Server URL and session file location
//! - **`session`** - The signed-in identity and its persistence
//! - **`api`** - HTTP client for every REST endpoint
//! - **`task`** - Background request workers polled by the UI
//! - **`state`** - `AppState`, the composition root, and per-view state
//! - **`views`** - One render function per screen
//! - **`theme`** - Colors and frame builders
//! - **`main`** - Main application entry point (binary)
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs       - Module exports and documentation
//! ├── main.rs      - Main application entry point
//! ├── app.rs       - eframe::App implementation
//! ├── config.rs    - Configuration management
//! ├── session.rs   - Session and session file
//! ├── api.rs       - API client and errors
//! ├── task.rs      - Background requests
//! ├── types.rs     - View enum and loading state
//! ├── helpers.rs   - Display helpers
//! ├── state/       - Application state
//! ├── views/       - Screens
//! └── theme/       - Styling
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! // Run the desktop client:
//! // cargo run --bin poetica_app
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod helpers;
pub mod session;
pub mod state;
pub mod task;
pub mod theme;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use api::{ApiClient, ApiError};
pub use app::PoeticaApp;
pub use config::Config;
pub use session::{Session, SessionHandle, SessionStore};
pub use state::AppState;
pub use task::Pending;
pub use types::{AppView, Loadable};
