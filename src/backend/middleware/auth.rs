/**
 * Authentication Middleware
 *
 * Protects routes that require a signed-in user. The middleware reads the
 * `Authorization: Bearer <token>` header, verifies the token, checks that
 * the user still exists, and attaches an `AuthenticatedUser` to the request
 * extensions. Handlers read it back through the `AuthUser` extractor.
 *
 * Any failure ends the request with 401 before a handler runs.
 *
 * Public routes that only change their answer for a signed-in caller use
 * `MaybeAuthUser` instead, which resolves the same identity but treats a
 * missing or unusable token as an anonymous request.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Identity resolved from a verified token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Verify a token and load the user it names
async fn resolve_user(app_state: &AppState, token: &str) -> Result<AuthenticatedUser, BackendError> {
    let claims = verify_token(&app_state.config, token).map_err(|e| {
        tracing::warn!("Invalid token: {}", e);
        BackendError::unauthorized("Token is not valid")
    })?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| BackendError::unauthorized("Token is not valid"))?;

    let user = app_state.store.find_user(user_id).await?.ok_or_else(|| {
        tracing::warn!("Token for unknown user {}", user_id);
        BackendError::unauthorized("Token is not valid")
    })?;

    Ok(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
    })
}

/// Authentication middleware
///
/// Returns 401 if the token is missing, invalid, expired, or names a user
/// that no longer exists.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        BackendError::unauthorized("No token, authorization denied")
    })?;

    let user = resolve_user(&app_state, token).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind `auth_middleware`; elsewhere it rejects
/// with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("No token, authorization denied")
            })?;

        Ok(AuthUser(user))
    }
}

/// Optional identity for public routes
///
/// `None` when there is no bearer token or it does not resolve to a user.
/// Store failures still reject the request.
#[derive(Clone, Debug)]
pub struct MaybeAuthUser(pub Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(MaybeAuthUser(None));
        };

        match resolve_user(state, token).await {
            Ok(user) => Ok(MaybeAuthUser(Some(user))),
            Err(BackendError::Unauthorized(_)) => {
                tracing::debug!("Ignoring unusable token on a public route");
                Ok(MaybeAuthUser(None))
            }
            Err(e) => Err(e),
        }
    }
}
