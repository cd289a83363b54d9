/**
 * Authentication Wire Types
 *
 * Request and response bodies of the `/auth` endpoints, shared by the
 * backend handlers and the desktop client.
 */

use serde::{Deserialize, Serialize};

use crate::shared::user::UserView;

/// Register request
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Plain password, hashed before storage
    #[serde(default)]
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Auth response
///
/// Returned by register and login. Contains the bearer token and the user
/// record (without the password hash).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}
