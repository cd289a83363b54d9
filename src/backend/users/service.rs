/**
 * User Service
 *
 * Profile reads and updates, and the follow toggle. Every user returned to
 * a client goes through `user_view`, which drops the password hash and
 * resolves follower and following ids to `{id, username}` summaries.
 */

use std::collections::HashMap;

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::{Store, UserRecord};
use crate::shared::{FollowResponse, Profile, UserSummary, UserView};

const USER_NOT_FOUND: &str = "User not found";

/// Public view of a user record
pub async fn user_view(store: &dyn Store, user: UserRecord) -> Result<UserView, BackendError> {
    let mut ids = user.followers.clone();
    ids.extend(user.following.iter().copied());
    let names: HashMap<Uuid, String> = store
        .user_briefs(&ids)
        .await?
        .into_iter()
        .map(|brief| (brief.id, brief.username))
        .collect();

    let summarize = |ids: &[Uuid]| -> Vec<UserSummary> {
        ids.iter()
            .filter_map(|id| {
                names.get(id).map(|username| UserSummary {
                    id: *id,
                    username: username.clone(),
                })
            })
            .collect()
    };

    Ok(UserView {
        followers: summarize(&user.followers),
        following: summarize(&user.following),
        id: user.id,
        username: user.username,
        email: user.email,
        profile: user.profile,
        created_at: user.created_at,
    })
}

/// The requester's own record
pub async fn get_profile(store: &dyn Store, requester_id: Uuid) -> Result<UserView, BackendError> {
    get_user_by_id(store, requester_id).await
}

/// Replace the requester's profile. `profile` must already be validated.
pub async fn update_profile(
    store: &dyn Store,
    requester_id: Uuid,
    profile: Profile,
) -> Result<UserView, BackendError> {
    let user = store
        .update_profile(requester_id, profile)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;
    tracing::info!("Profile updated for {}", user.username);
    user_view(store, user).await
}

pub async fn get_user_by_id(store: &dyn Store, id: Uuid) -> Result<UserView, BackendError> {
    let user = store
        .find_user(id)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;
    user_view(store, user).await
}

/// Follow `target_id` if the requester does not follow it yet, unfollow
/// otherwise.
pub async fn toggle_follow(
    store: &dyn Store,
    target_id: Uuid,
    requester_id: Uuid,
) -> Result<FollowResponse, BackendError> {
    if target_id == requester_id {
        return Err(BackendError::bad_request("You cannot follow yourself"));
    }

    let is_following = store
        .toggle_follow(requester_id, target_id)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;

    tracing::debug!(%requester_id, %target_id, is_following, "Follow toggled");
    Ok(FollowResponse {
        message: if is_following { "Followed" } else { "Unfollowed" }.to_string(),
        is_following,
    })
}
