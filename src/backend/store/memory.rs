//! In-memory store.
//!
//! Users and poems live in one `Collections` value behind a single
//! `tokio::sync::RwLock`. Every mutation takes the write lock once, which
//! makes multi-document updates (follow toggles touch two users) atomic.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::store::{
    CommentRecord, LikeToggle, NewComment, NewPoem, NewUser, PoemChanges, PoemFilter, PoemRecord,
    Store, StoreError, StoreResult, UserBrief, UserRecord,
};
use crate::shared::Profile;

#[derive(Debug, Default)]
struct Collections {
    users: HashMap<Uuid, UserRecord>,
    /// Insertion order; listing relies on it to break timestamp ties
    poems: Vec<PoemRecord>,
}

impl Collections {
    fn poem_mut(&mut self, id: Uuid) -> Option<&mut PoemRecord> {
        self.poems.iter_mut().find(|p| p.id == id)
    }
}

/// In-memory store for development and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<UserRecord> {
        let mut data = self.inner.write().await;
        if data.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate("username"));
        }
        if data.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate("email"));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            profile: Profile::default(),
            followers: Vec::new(),
            following: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        data.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<UserRecord>> {
        let data = self.inner.read().await;
        Ok(data.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let data = self.inner.read().await;
        Ok(data.users.values().find(|u| u.email == email).cloned())
    }

    async fn user_briefs(&self, ids: &[Uuid]) -> StoreResult<Vec<UserBrief>> {
        let data = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| data.users.get(id))
            .map(|u| UserBrief {
                id: u.id,
                username: u.username.clone(),
                profile: u.profile.clone(),
            })
            .collect())
    }

    async fn update_profile(&self, id: Uuid, profile: Profile) -> StoreResult<Option<UserRecord>> {
        let mut data = self.inner.write().await;
        Ok(data.users.get_mut(&id).map(|user| {
            user.profile = profile;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn toggle_follow(&self, follower_id: Uuid, followee_id: Uuid) -> StoreResult<Option<bool>> {
        let mut data = self.inner.write().await;
        if !data.users.contains_key(&followee_id) || !data.users.contains_key(&follower_id) {
            return Ok(None);
        }

        let now = Utc::now();
        let already_following = data
            .users
            .get(&follower_id)
            .is_some_and(|u| u.following.contains(&followee_id));

        if let Some(follower) = data.users.get_mut(&follower_id) {
            if already_following {
                follower.following.retain(|id| *id != followee_id);
            } else {
                follower.following.push(followee_id);
            }
            follower.updated_at = now;
        }
        if let Some(followee) = data.users.get_mut(&followee_id) {
            if already_following {
                followee.followers.retain(|id| *id != follower_id);
            } else {
                followee.followers.push(follower_id);
            }
            followee.updated_at = now;
        }

        Ok(Some(!already_following))
    }

    async fn insert_poem(&self, poem: NewPoem) -> StoreResult<PoemRecord> {
        let mut data = self.inner.write().await;
        let now = Utc::now();
        let record = PoemRecord {
            id: Uuid::new_v4(),
            title: poem.title,
            content: poem.content,
            category: poem.category,
            tags: poem.tags,
            author_id: poem.author_id,
            is_published: poem.is_published,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        data.poems.push(record.clone());
        Ok(record)
    }

    async fn find_poem(&self, id: Uuid) -> StoreResult<Option<PoemRecord>> {
        let data = self.inner.read().await;
        Ok(data.poems.iter().find(|p| p.id == id).cloned())
    }

    async fn list_poems(&self, filter: PoemFilter) -> StoreResult<(Vec<PoemRecord>, u64)> {
        let data = self.inner.read().await;
        let mut matching: Vec<&PoemRecord> = data
            .poems
            .iter()
            .rev()
            .filter(|p| filter.include_drafts || p.is_published)
            .filter(|p| filter.author_id.map_or(true, |author| p.author_id == author))
            .collect();
        // Stable sort keeps newest-inserted first among equal timestamps
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let skip = usize::try_from(filter.offset).unwrap_or(usize::MAX);
        let page = matching
            .into_iter()
            .skip(skip)
            .take(filter.limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn update_poem(&self, id: Uuid, changes: PoemChanges) -> StoreResult<Option<PoemRecord>> {
        let mut data = self.inner.write().await;
        Ok(data.poem_mut(id).map(|poem| {
            poem.title = changes.title;
            poem.content = changes.content;
            if let Some(category) = changes.category {
                poem.category = category;
            }
            if let Some(tags) = changes.tags {
                poem.tags = tags;
            }
            if let Some(is_published) = changes.is_published {
                poem.is_published = is_published;
            }
            poem.updated_at = Utc::now();
            poem.clone()
        }))
    }

    async fn delete_poem(&self, id: Uuid) -> StoreResult<bool> {
        let mut data = self.inner.write().await;
        let before = data.poems.len();
        data.poems.retain(|p| p.id != id);
        Ok(data.poems.len() != before)
    }

    async fn toggle_like(&self, poem_id: Uuid, user_id: Uuid) -> StoreResult<Option<LikeToggle>> {
        let mut data = self.inner.write().await;
        Ok(data.poem_mut(poem_id).map(|poem| {
            let liked = match poem.likes.iter().position(|id| *id == user_id) {
                Some(index) => {
                    poem.likes.remove(index);
                    false
                }
                None => {
                    poem.likes.push(user_id);
                    true
                }
            };
            poem.updated_at = Utc::now();
            LikeToggle {
                liked,
                likes: poem.likes.len() as u64,
            }
        }))
    }

    async fn append_comment(
        &self,
        poem_id: Uuid,
        comment: NewComment,
    ) -> StoreResult<Option<Vec<CommentRecord>>> {
        let mut data = self.inner.write().await;
        Ok(data.poem_mut(poem_id).map(|poem| {
            let now = Utc::now();
            poem.comments.push(CommentRecord {
                id: Uuid::new_v4(),
                user_id: comment.user_id,
                text: comment.text,
                created_at: now,
            });
            poem.updated_at = now;
            poem.comments.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Category;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            email: format!("{}@example.com", name),
            password_hash: "hash".to_string(),
        }
    }

    fn new_poem(author_id: Uuid, title: &str, is_published: bool) -> NewPoem {
        NewPoem {
            author_id,
            title: title.to_string(),
            content: "...".to_string(),
            category: Category::Other,
            tags: Vec::new(),
            is_published,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email() {
        let store = MemoryStore::new();
        store.insert_user(new_user("keats")).await.unwrap();

        let err = store.insert_user(new_user("keats")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate("username")));

        let mut other = new_user("shelley");
        other.email = "keats@example.com".to_string();
        let err = store.insert_user(other).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate("email")));
    }

    #[tokio::test]
    async fn test_toggle_follow_updates_both_sides() {
        let store = MemoryStore::new();
        let a = store.insert_user(new_user("keats")).await.unwrap();
        let b = store.insert_user(new_user("shelley")).await.unwrap();

        assert_eq!(store.toggle_follow(a.id, b.id).await.unwrap(), Some(true));
        let a_now = store.find_user(a.id).await.unwrap().unwrap();
        let b_now = store.find_user(b.id).await.unwrap().unwrap();
        assert_eq!(a_now.following, vec![b.id]);
        assert_eq!(b_now.followers, vec![a.id]);

        assert_eq!(store.toggle_follow(a.id, b.id).await.unwrap(), Some(false));
        let a_now = store.find_user(a.id).await.unwrap().unwrap();
        let b_now = store.find_user(b.id).await.unwrap().unwrap();
        assert!(a_now.following.is_empty());
        assert!(b_now.followers.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_follow_missing_target() {
        let store = MemoryStore::new();
        let a = store.insert_user(new_user("keats")).await.unwrap();
        assert_eq!(store.toggle_follow(a.id, Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_filtered() {
        let store = MemoryStore::new();
        let author = Uuid::new_v4();
        let other = Uuid::new_v4();
        store.insert_poem(new_poem(author, "first", true)).await.unwrap();
        store.insert_poem(new_poem(author, "draft", false)).await.unwrap();
        store.insert_poem(new_poem(other, "second", true)).await.unwrap();
        store.insert_poem(new_poem(author, "third", true)).await.unwrap();

        let (poems, total) = store
            .list_poems(PoemFilter { limit: 10, ..PoemFilter::default() })
            .await
            .unwrap();
        let titles: Vec<&str> = poems.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
        assert_eq!(total, 3);

        let (poems, total) = store
            .list_poems(PoemFilter {
                author_id: Some(author),
                offset: 1,
                limit: 10,
                ..PoemFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(poems.len(), 1);
        assert_eq!(poems[0].title, "first");
    }

    #[tokio::test]
    async fn test_toggle_like_is_an_involution() {
        let store = MemoryStore::new();
        let poem = store.insert_poem(new_poem(Uuid::new_v4(), "p", true)).await.unwrap();
        let user = Uuid::new_v4();

        let first = store.toggle_like(poem.id, user).await.unwrap().unwrap();
        assert_eq!(first, LikeToggle { liked: true, likes: 1 });
        let second = store.toggle_like(poem.id, user).await.unwrap().unwrap();
        assert_eq!(second, LikeToggle { liked: false, likes: 0 });
    }

    #[tokio::test]
    async fn test_concurrent_likes_are_not_lost() {
        let store = MemoryStore::new();
        let poem = store.insert_poem(new_poem(Uuid::new_v4(), "p", true)).await.unwrap();

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.toggle_like(poem.id, Uuid::new_v4()).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let poem = store.find_poem(poem.id).await.unwrap().unwrap();
        assert_eq!(poem.likes.len(), 32);
    }

    #[tokio::test]
    async fn test_append_comment_keeps_order() {
        let store = MemoryStore::new();
        let poem = store.insert_poem(new_poem(Uuid::new_v4(), "p", true)).await.unwrap();
        let user = Uuid::new_v4();
        for text in ["one", "two"] {
            store
                .append_comment(poem.id, NewComment { user_id: user, text: text.to_string() })
                .await
                .unwrap();
        }
        let comments = store.find_poem(poem.id).await.unwrap().unwrap().comments;
        let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_delete_poem() {
        let store = MemoryStore::new();
        let poem = store.insert_poem(new_poem(Uuid::new_v4(), "p", true)).await.unwrap();
        assert!(store.delete_poem(poem.id).await.unwrap());
        assert!(!store.delete_poem(poem.id).await.unwrap());
        assert!(store.find_poem(poem.id).await.unwrap().is_none());
    }
}
