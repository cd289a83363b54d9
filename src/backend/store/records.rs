/**
 * Store Records
 *
 * The document shapes the store persists and returns. Records carry raw
 * references (user ids); services populate them into wire views.
 */

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::{Category, Profile};

/// User document
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never leaves the backend
    pub password_hash: String,
    pub profile: Profile,
    /// Users following this user, in follow order
    pub followers: Vec<Uuid>,
    /// Users this user follows, in follow order
    pub following: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// The subset of a user needed to populate references
#[derive(Debug, Clone, PartialEq)]
pub struct UserBrief {
    pub id: Uuid,
    pub username: String,
    pub profile: Profile,
}

/// Poem document
#[derive(Debug, Clone, PartialEq)]
pub struct PoemRecord {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub author_id: Uuid,
    pub is_published: bool,
    /// Users who liked the poem, in like order
    pub likes: Vec<Uuid>,
    pub comments: Vec<CommentRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create a poem
#[derive(Debug, Clone)]
pub struct NewPoem {
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub is_published: bool,
}

/// The mutable fields of a poem. `None` keeps the stored value.
#[derive(Debug, Clone)]
pub struct PoemChanges {
    pub title: String,
    pub content: String,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: Uuid,
    pub text: String,
}

/// Listing filter. Drafts are listed only when `include_drafts` is set.
#[derive(Debug, Clone, Default)]
pub struct PoemFilter {
    pub author_id: Option<Uuid>,
    pub include_drafts: bool,
    pub offset: u64,
    pub limit: u32,
}

/// Outcome of a like toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    /// Whether the user likes the poem after the toggle
    pub liked: bool,
    /// Like count after the toggle
    pub likes: u64,
}
