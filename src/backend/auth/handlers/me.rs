/**
 * Get Current User Handler
 *
 * `GET /auth/me` returns the record of the user the bearer token belongs
 * to. The client uses it to check a restored session at start-up.
 */

use axum::{extract::State, Json};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::DynStore;
use crate::backend::users::service::get_profile;
use crate::shared::UserView;

pub async fn get_me(
    State(store): State<DynStore>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserView>, BackendError> {
    Ok(Json(get_profile(store.as_ref(), user.user_id).await?))
}
