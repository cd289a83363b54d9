/**
 * PostgreSQL Store
 *
 * `Store` implementation over a `sqlx::PgPool`. The schema lives in
 * `migrations/` and is applied by `server::config::load_database`.
 *
 * # Layout
 *
 * Users carry their profile as columns. Follow relationships live in one
 * `follows` table, so a user's `followers` and `following` are two views of
 * the same rows and cannot disagree. Likes and comments are child tables of
 * `poems` and are hydrated in bulk for a page of poems.
 *
 * # Concurrency
 *
 * Like toggles and comment appends lock the parent poem row
 * (`SELECT ... FOR UPDATE`) inside a transaction; follow toggles run inside
 * a transaction keyed on the `(follower_id, followee_id)` primary key.
 */

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::backend::store::{
    CommentRecord, LikeToggle, NewComment, NewPoem, NewUser, PoemChanges, PoemFilter, PoemRecord,
    Store, StoreError, StoreResult, UserBrief, UserRecord,
};
use crate::shared::{Category, Profile};

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, bio, \
                            location, created_at, updated_at";

const POEM_COLUMNS: &str =
    "id, title, content, category, tags, author_id, is_published, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    location: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn profile(&self) -> Profile {
        Profile {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            bio: self.bio.clone(),
            location: self.location.clone(),
        }
    }

    fn into_record(self, followers: Vec<Uuid>, following: Vec<Uuid>) -> UserRecord {
        let profile = self.profile();
        UserRecord {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            profile,
            followers,
            following,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BriefRow {
    id: Uuid,
    username: String,
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    location: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct PoemRow {
    id: Uuid,
    title: String,
    content: String,
    category: String,
    tags: Vec<String>,
    author_id: Uuid,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct LikeRow {
    poem_id: Uuid,
    user_id: Uuid,
}

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    poem_id: Uuid,
    user_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for CommentRecord {
    fn from(row: CommentRow) -> Self {
        CommentRecord {
            id: row.id,
            user_id: row.user_id,
            text: row.text,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn follow_ids(&self, user_id: Uuid) -> StoreResult<(Vec<Uuid>, Vec<Uuid>)> {
        let followers: Vec<Uuid> = sqlx::query_scalar(
            "SELECT follower_id FROM follows WHERE followee_id = $1 ORDER BY created_at, follower_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let following: Vec<Uuid> = sqlx::query_scalar(
            "SELECT followee_id FROM follows WHERE follower_id = $1 ORDER BY created_at, followee_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok((followers, following))
    }

    async fn hydrate_user(&self, row: Option<UserRow>) -> StoreResult<Option<UserRecord>> {
        match row {
            Some(row) => {
                let (followers, following) = self.follow_ids(row.id).await?;
                Ok(Some(row.into_record(followers, following)))
            }
            None => Ok(None),
        }
    }

    /// Attaches likes and comments to a batch of poem rows, preserving row order
    async fn hydrate_poems(&self, rows: Vec<PoemRow>) -> StoreResult<Vec<PoemRecord>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let like_rows: Vec<LikeRow> = sqlx::query_as(
            "SELECT poem_id, user_id FROM poem_likes WHERE poem_id = ANY($1) ORDER BY created_at, user_id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let comment_rows: Vec<CommentRow> = sqlx::query_as(
            "SELECT id, poem_id, user_id, text, created_at FROM poem_comments \
             WHERE poem_id = ANY($1) ORDER BY seq",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut likes: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for like in like_rows {
            likes.entry(like.poem_id).or_default().push(like.user_id);
        }
        let mut comments: HashMap<Uuid, Vec<CommentRecord>> = HashMap::new();
        for comment in comment_rows {
            comments.entry(comment.poem_id).or_default().push(comment.into());
        }

        rows.into_iter()
            .map(|row| {
                let category = Category::from_str(&row.category)
                    .map_err(|_| StoreError::Corrupt(format!("poem {} category {:?}", row.id, row.category)))?;
                Ok(PoemRecord {
                    likes: likes.remove(&row.id).unwrap_or_default(),
                    comments: comments.remove(&row.id).unwrap_or_default(),
                    id: row.id,
                    title: row.title,
                    content: row.content,
                    category,
                    tags: row.tags,
                    author_id: row.author_id,
                    is_published: row.is_published,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                })
            })
            .collect()
    }

    async fn hydrate_poem(&self, row: Option<PoemRow>) -> StoreResult<Option<PoemRecord>> {
        match row {
            Some(row) => Ok(self.hydrate_poems(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }
}

/// Locks the poem row for the rest of the transaction. `false` if it is gone.
async fn lock_poem(tx: &mut Transaction<'_, Postgres>, poem_id: Uuid) -> StoreResult<bool> {
    let locked: Option<Uuid> = sqlx::query_scalar("SELECT id FROM poems WHERE id = $1 FOR UPDATE")
        .bind(poem_id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(locked.is_some())
}

/// Maps unique violations on the users table to `StoreError::Duplicate`
fn map_user_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return match db.constraint() {
                Some(c) if c.contains("email") => StoreError::Duplicate("email"),
                _ => StoreError::Duplicate("username"),
            };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<UserRecord> {
        let now = Utc::now();
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (id, username, email, password_hash, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_insert_error)?;

        Ok(row.into_record(Vec::new(), Vec::new()))
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<UserRecord>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        self.hydrate_user(row).await
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        self.hydrate_user(row).await
    }

    async fn user_briefs(&self, ids: &[Uuid]) -> StoreResult<Vec<UserBrief>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<BriefRow> = sqlx::query_as(
            "SELECT id, username, first_name, last_name, bio, location FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_id: HashMap<Uuid, BriefRow> = rows.into_iter().map(|r| (r.id, r)).collect();
        Ok(ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(|r| UserBrief {
                id: r.id,
                username: r.username,
                profile: Profile {
                    first_name: r.first_name,
                    last_name: r.last_name,
                    bio: r.bio,
                    location: r.location,
                },
            })
            .collect())
    }

    async fn update_profile(&self, id: Uuid, profile: Profile) -> StoreResult<Option<UserRecord>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET first_name = $2, last_name = $3, bio = $4, location = $5, updated_at = $6 \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(profile.first_name)
        .bind(profile.last_name)
        .bind(profile.bio)
        .bind(profile.location)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        self.hydrate_user(row).await
    }

    async fn toggle_follow(&self, follower_id: Uuid, followee_id: Uuid) -> StoreResult<Option<bool>> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(followee_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let removed = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2")
            .bind(follower_id)
            .bind(followee_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let now = Utc::now();
        if removed == 0 {
            sqlx::query(
                "INSERT INTO follows (follower_id, followee_id, created_at) VALUES ($1, $2, $3) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(follower_id)
            .bind(followee_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE users SET updated_at = $3 WHERE id = $1 OR id = $2")
            .bind(follower_id)
            .bind(followee_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(removed == 0))
    }

    async fn insert_poem(&self, poem: NewPoem) -> StoreResult<PoemRecord> {
        let now = Utc::now();
        let row: PoemRow = sqlx::query_as(&format!(
            "INSERT INTO poems (id, title, content, category, tags, author_id, is_published, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) RETURNING {POEM_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&poem.title)
        .bind(&poem.content)
        .bind(poem.category.as_str())
        .bind(&poem.tags)
        .bind(poem.author_id)
        .bind(poem.is_published)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        self.hydrate_poem(Some(row))
            .await?
            .ok_or_else(|| StoreError::Corrupt("inserted poem vanished".to_string()))
    }

    async fn find_poem(&self, id: Uuid) -> StoreResult<Option<PoemRecord>> {
        let row: Option<PoemRow> =
            sqlx::query_as(&format!("SELECT {POEM_COLUMNS} FROM poems WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        self.hydrate_poem(row).await
    }

    async fn list_poems(&self, filter: PoemFilter) -> StoreResult<(Vec<PoemRecord>, u64)> {
        let offset = i64::try_from(filter.offset).unwrap_or(i64::MAX);

        let rows: Vec<PoemRow> = sqlx::query_as(&format!(
            "SELECT {POEM_COLUMNS} FROM poems \
             WHERE (is_published OR $4) AND ($1::uuid IS NULL OR author_id = $1) \
             ORDER BY created_at DESC, seq DESC LIMIT $2 OFFSET $3"
        ))
        .bind(filter.author_id)
        .bind(i64::from(filter.limit))
        .bind(offset)
        .bind(filter.include_drafts)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM poems \
             WHERE (is_published OR $2) AND ($1::uuid IS NULL OR author_id = $1)",
        )
        .bind(filter.author_id)
        .bind(filter.include_drafts)
        .fetch_one(&self.pool)
        .await?;

        let poems = self.hydrate_poems(rows).await?;
        Ok((poems, u64::try_from(total).unwrap_or_default()))
    }

    async fn update_poem(&self, id: Uuid, changes: PoemChanges) -> StoreResult<Option<PoemRecord>> {
        let row: Option<PoemRow> = sqlx::query_as(&format!(
            "UPDATE poems SET title = $2, content = $3, category = COALESCE($4, category), \
             tags = COALESCE($5, tags), is_published = COALESCE($7, is_published), updated_at = $6 \
             WHERE id = $1 RETURNING {POEM_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(changes.category.map(|c| c.as_str()))
        .bind(changes.tags)
        .bind(Utc::now())
        .bind(changes.is_published)
        .fetch_optional(&self.pool)
        .await?;
        self.hydrate_poem(row).await
    }

    async fn delete_poem(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM poems WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn toggle_like(&self, poem_id: Uuid, user_id: Uuid) -> StoreResult<Option<LikeToggle>> {
        let mut tx = self.pool.begin().await?;
        if !lock_poem(&mut tx, poem_id).await? {
            return Ok(None);
        }

        let removed = sqlx::query("DELETE FROM poem_likes WHERE poem_id = $1 AND user_id = $2")
            .bind(poem_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let now = Utc::now();
        if removed == 0 {
            sqlx::query("INSERT INTO poem_likes (poem_id, user_id, created_at) VALUES ($1, $2, $3)")
                .bind(poem_id)
                .bind(user_id)
                .bind(now)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE poems SET updated_at = $2 WHERE id = $1")
            .bind(poem_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        let likes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM poem_likes WHERE poem_id = $1")
            .bind(poem_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(LikeToggle {
            liked: removed == 0,
            likes: u64::try_from(likes).unwrap_or_default(),
        }))
    }

    async fn append_comment(
        &self,
        poem_id: Uuid,
        comment: NewComment,
    ) -> StoreResult<Option<Vec<CommentRecord>>> {
        let mut tx = self.pool.begin().await?;
        if !lock_poem(&mut tx, poem_id).await? {
            return Ok(None);
        }

        let now = Utc::now();
        sqlx::query(
            "INSERT INTO poem_comments (id, poem_id, user_id, text, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(poem_id)
        .bind(comment.user_id)
        .bind(&comment.text)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE poems SET updated_at = $2 WHERE id = $1")
            .bind(poem_id)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        let rows: Vec<CommentRow> = sqlx::query_as(
            "SELECT id, poem_id, user_id, text, created_at FROM poem_comments WHERE poem_id = $1 ORDER BY seq",
        )
        .bind(poem_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(rows.into_iter().map(CommentRecord::from).collect()))
    }
}
