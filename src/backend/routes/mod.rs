//! Route Configuration Module
//!
//! - **`router`** - Main router creation, middleware layers, fallback
//! - **`api_routes`** - `/auth`, `/poems` and `/users` endpoints
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint wiring
//! ```

/// Main router creation
pub mod router;

/// API endpoint wiring
pub mod api_routes;

pub use router::create_router;
