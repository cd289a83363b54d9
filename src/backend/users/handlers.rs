/**
 * User Handlers
 *
 * - `GET /users/profile` (auth) - own record
 * - `PUT /users/profile` (auth) - replace own profile
 * - `GET /users/{id}` - any user's record
 * - `POST /users/follow/{id}` (auth) - follow toggle
 */

use axum::{
    extract::{Path, State},
    Json,
};

use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::DynStore;
use crate::backend::users::service;
use crate::backend::validation::{parse_id, validate_profile};
use crate::shared::{FollowResponse, UpdateProfileRequest, UserView};

pub async fn get_profile(
    State(store): State<DynStore>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserView>, BackendError> {
    Ok(Json(service::get_profile(store.as_ref(), user.user_id).await?))
}

pub async fn update_profile(
    State(store): State<DynStore>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<UserView>, BackendError> {
    let profile = validate_profile(request.profile)?;
    Ok(Json(service::update_profile(store.as_ref(), user.user_id, profile).await?))
}

pub async fn get_user(
    State(store): State<DynStore>,
    Path(id): Path<String>,
) -> Result<Json<UserView>, BackendError> {
    let id = parse_id(&id, "User not found")?;
    Ok(Json(service::get_user_by_id(store.as_ref(), id).await?))
}

pub async fn follow_user(
    State(store): State<DynStore>,
    Path(id): Path<String>,
    AuthUser(user): AuthUser,
) -> Result<Json<FollowResponse>, BackendError> {
    let target_id = parse_id(&id, "User not found")?;
    Ok(Json(service::toggle_follow(store.as_ref(), target_id, user.user_id).await?))
}
