/**
 * Poem Wire Types
 *
 * JSON shapes exchanged by the poem endpoints: the poem view with its
 * populated author and comments, the listing envelope, and the request
 * bodies for creating, updating and commenting.
 *
 * Request bodies keep `title`, `content` and `category` as plain strings
 * with serde defaults so that a missing or unknown value reaches the
 * validators and comes back as a field-level error instead of a body
 * rejection.
 */

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::pagination::Pagination;
use crate::shared::user::UserSummary;

/// Poem category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Love,
    Nature,
    Life,
    Spiritual,
    Social,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Love,
        Category::Nature,
        Category::Life,
        Category::Spiritual,
        Category::Social,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Love => "love",
            Category::Nature => "nature",
            Category::Life => "life",
            Category::Spiritual => "spiritual",
            Category::Social => "social",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                SharedError::validation(
                    "category",
                    "Category must be one of love, nature, life, spiritual, social, other",
                )
            })
    }
}

/// Name fields attached to an author summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Author identity attached to a poem for rendering without a separate lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub profile: AuthorProfile,
}

impl AuthorSummary {
    pub fn display_name(&self) -> String {
        match (&self.profile.first_name, &self.profile.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            _ => self.username.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeView {
    pub user: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: Uuid,
    pub user: UserSummary,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A poem with its author and comment authors populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: AuthorSummary,
    pub is_published: bool,
    #[serde(default)]
    pub likes: Vec<LikeView>,
    #[serde(default)]
    pub comments: Vec<CommentView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PoemView {
    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.likes.iter().any(|like| like.user == user_id)
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author.id == user_id
    }
}

/// Body returned by `GET /poems`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoemListResponse {
    pub poems: Vec<PoemView>,
    pub pagination: Pagination,
}

/// Body of `POST /poems`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePoemRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// Body of `PUT /poems/:id`. Only these fields are ever applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePoemRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// Body of `POST /poems/:id/comment`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub text: String,
}

/// Body returned by `POST /poems/:id/like`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub likes: u64,
    pub is_liked: bool,
}

/// `{message}` body used by delete, logout and errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str_is_case_insensitive() {
        assert_eq!("Nature".parse::<Category>().unwrap(), Category::Nature);
        assert_eq!(" love ".parse::<Category>().unwrap(), Category::Love);
    }

    #[test]
    fn test_category_from_str_rejects_unknown() {
        let err = "epic".parse::<Category>().unwrap_err();
        assert_eq!(err.field(), Some("category"));
    }

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Category::Spiritual).unwrap(), "spiritual");
    }

    #[test]
    fn test_create_request_tolerates_missing_fields() {
        let request: CreatePoemRequest = serde_json::from_str("{}").unwrap();
        assert!(request.title.is_empty());
        assert!(request.tags.is_empty());
        assert_eq!(request.is_published, None);
    }

    #[test]
    fn test_update_request_ignores_unknown_fields() {
        let request: UpdatePoemRequest = serde_json::from_value(serde_json::json!({
            "title": "Dusk",
            "content": "...",
            "author": "00000000-0000-0000-0000-000000000000",
        }))
        .unwrap();
        assert_eq!(request.title, "Dusk");
        assert!(request.tags.is_none());
    }

    #[test]
    fn test_like_response_wire_format() {
        let json = serde_json::to_value(LikeResponse { likes: 1, is_liked: true }).unwrap();
        assert_eq!(json, serde_json::json!({ "likes": 1, "isLiked": true }));
    }

    #[test]
    fn test_author_display_name() {
        let author = AuthorSummary {
            id: Uuid::new_v4(),
            username: "basho".to_string(),
            profile: AuthorProfile::default(),
        };
        assert_eq!(author.display_name(), "basho");
    }
}
