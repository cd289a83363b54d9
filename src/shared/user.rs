/**
 * User Wire Types
 *
 * JSON shapes for user records as the API returns them. The password hash
 * never appears in any of these types.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional profile details of a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Profile {
    /// "First Last" when both names are set
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            _ => None,
        }
    }
}

/// Minimal user reference: follower lists and comment authors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
}

/// Full public view of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub followers: Vec<UserSummary>,
    #[serde(default)]
    pub following: Vec<UserSummary>,
    pub created_at: DateTime<Utc>,
}

impl UserView {
    /// Full name when known, username otherwise
    pub fn display_name(&self) -> String {
        self.profile
            .full_name()
            .unwrap_or_else(|| self.username.clone())
    }

    pub fn is_followed_by(&self, user_id: Uuid) -> bool {
        self.followers.iter().any(|f| f.id == user_id)
    }
}

/// Body of `PUT /users/profile`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub profile: Profile,
}

/// Body returned by `POST /users/follow/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowResponse {
    pub message: String,
    pub is_following: bool,
}
