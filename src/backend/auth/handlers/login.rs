/**
 * Login Handler
 *
 * `POST /auth/login`
 *
 * Unknown email and wrong password produce the same `401 Invalid
 * credentials`, so the endpoint does not reveal which accounts exist.
 */

use axum::{extract::State, Json};

use crate::backend::auth::sessions::create_token;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::server::state::AppState;
use crate::backend::users::service::user_view;
use crate::backend::validation::validate_login;
use crate::shared::{AuthResponse, LoginRequest};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

async fn verify_password(password: String, hash: String) -> Result<bool, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| BackendError::internal(format!("verify task failed: {}", e)))?
        .map_err(BackendError::from)
}

pub async fn login(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let (email, password) = validate_login(request)?;

    let user = match app_state.store.find_user_by_email(&email).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Login attempt for unknown email");
            return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    if !verify_password(password, user.password_hash.clone()).await? {
        tracing::warn!("Invalid password for user: {}", user.username);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = create_token(&app_state.config, user.id, &user.username)?;
    tracing::info!("User logged in: {}", user.username);

    let user = user_view(app_state.store.as_ref(), user).await?;
    Ok(Json(AuthResponse { token, user }))
}
