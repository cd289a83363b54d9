/**
 * Register Handler
 *
 * `POST /auth/register`
 *
 * # Registration Process
 *
 * 1. Validate username, email and password (every failing field is reported)
 * 2. Hash the password with bcrypt at the configured cost
 * 3. Insert the user; the store rejects a taken username or email
 * 4. Issue a token and return `201 {token, user}`
 *
 * # Errors
 *
 * * `400 Bad Request` - Invalid fields, or `User already exists`
 * * `500 Internal Server Error` - Hashing, storage or token failure
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::auth::sessions::create_token;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::server::state::AppState;
use crate::backend::store::NewUser;
use crate::backend::users::service::user_view;
use crate::backend::validation::validate_registration;
use crate::shared::{AuthResponse, RegisterRequest};

/// Hash a password off the async runtime
async fn hash_password(password: String, cost: u32) -> Result<String, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::internal(format!("hashing task failed: {}", e)))?
        .map_err(BackendError::from)
}

pub async fn register(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let registration = validate_registration(request)?;
    tracing::info!("Register request for username: {}", registration.username);

    let password_hash = hash_password(registration.password, app_state.config.bcrypt_cost).await?;

    let user = app_state
        .store
        .insert_user(NewUser {
            username: registration.username,
            email: registration.email,
            password_hash,
        })
        .await
        .inspect_err(|e| tracing::warn!("Registration rejected: {}", e))?;

    let token = create_token(&app_state.config, user.id, &user.username)?;
    tracing::info!("User created successfully: {}", user.username);

    let user = user_view(app_state.store.as_ref(), user).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}
