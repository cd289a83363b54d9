//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs        - Module exports
//! ├── register.rs   - POST /auth/register
//! ├── login.rs      - POST /auth/login
//! ├── logout.rs     - POST /auth/logout
//! └── me.rs         - GET /auth/me
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email, password → user created → token returned
//! 2. **Login**: email, password → credentials verified → token returned
//! 3. **Me**: token → verified by middleware → user returned
//! 4. **Logout**: acknowledged; the client forgets its token

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Get current user handler
pub mod me;

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use register::register;
