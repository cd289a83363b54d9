//! Document Store Module
//!
//! Persistence for users and poems behind the [`Store`] trait.
//!
//! # Implementations
//!
//! - **`postgres`** - `PgStore`, PostgreSQL through `sqlx`. Used whenever
//!   `DATABASE_URL` is configured.
//! - **`memory`** - `MemoryStore`, everything behind one `RwLock`. Used when
//!   no database is configured and by the test-suite.
//!
//! # Atomicity
//!
//! Like toggles, follow toggles and comment appends are single store
//! operations. Each implementation makes them atomic (a transaction holding
//! a row lock, or a single write-lock critical section), so concurrent
//! toggles cannot lose updates and the two sides of a follow relationship
//! can never disagree.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::Profile;

/// Record types
pub mod records;

/// In-memory implementation
pub mod memory;

/// PostgreSQL implementation
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use records::{
    CommentRecord, LikeToggle, NewComment, NewPoem, NewUser, PoemChanges, PoemFilter, PoemRecord,
    UserBrief, UserRecord,
};

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique field (`username` or `email`) is already taken
    #[error("{0} already exists")]
    Duplicate(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value could not be mapped back into a record
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operations used by the services.
///
/// Lookups return `Ok(None)` for ids that do not resolve; mutations on a
/// missing document return `Ok(None)` / `Ok(false)` the same way.
#[async_trait]
pub trait Store: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Creates a user. Fails with `Duplicate` on a taken username or email.
    async fn insert_user(&self, user: NewUser) -> StoreResult<UserRecord>;

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<UserRecord>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;

    /// Briefs for every id that resolves. Unknown ids are skipped.
    async fn user_briefs(&self, ids: &[Uuid]) -> StoreResult<Vec<UserBrief>>;

    /// Replaces the profile sub-document.
    async fn update_profile(&self, id: Uuid, profile: Profile) -> StoreResult<Option<UserRecord>>;

    /// Flips the follow relationship `follower -> followee`.
    ///
    /// Returns whether `follower` follows `followee` afterwards, or `None`
    /// when `followee` does not exist.
    async fn toggle_follow(&self, follower_id: Uuid, followee_id: Uuid) -> StoreResult<Option<bool>>;

    // =========================================================================
    // Poem operations
    // =========================================================================

    async fn insert_poem(&self, poem: NewPoem) -> StoreResult<PoemRecord>;

    async fn find_poem(&self, id: Uuid) -> StoreResult<Option<PoemRecord>>;

    /// Poems matching the filter, newest first, with the total number of
    /// matches before skip/limit.
    async fn list_poems(&self, filter: PoemFilter) -> StoreResult<(Vec<PoemRecord>, u64)>;

    async fn update_poem(&self, id: Uuid, changes: PoemChanges) -> StoreResult<Option<PoemRecord>>;

    /// Returns whether a poem was removed.
    async fn delete_poem(&self, id: Uuid) -> StoreResult<bool>;

    /// Flips the user's like on a poem. `None` when the poem does not exist.
    async fn toggle_like(&self, poem_id: Uuid, user_id: Uuid) -> StoreResult<Option<LikeToggle>>;

    /// Appends a comment and returns the full comment list.
    async fn append_comment(
        &self,
        poem_id: Uuid,
        comment: NewComment,
    ) -> StoreResult<Option<Vec<CommentRecord>>>;
}
