/**
 * Poem Service
 *
 * CRUD over poems plus the like toggle and comments. Store records carry
 * raw user ids; `populate` resolves authors and comment authors in one
 * batched lookup before anything is returned.
 *
 * # Authorization
 *
 * Update and delete are author-only (`Forbidden` otherwise). Liking and
 * commenting are open to any authenticated user. The caller passes the
 * identity resolved by the auth middleware.
 */

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::store::{
    CommentRecord, NewComment, NewPoem, PoemChanges, PoemFilter, PoemRecord, Store, UserBrief,
};
use crate::backend::validation::ValidPoem;
use crate::shared::{
    AuthorProfile, AuthorSummary, CommentView, LikeResponse, LikeView, MessageResponse, PageRequest,
    PoemListResponse, PoemView, UserSummary,
};

const POEM_NOT_FOUND: &str = "Poem not found";
const NOT_AUTHORIZED: &str = "Not authorized";

type Briefs = HashMap<Uuid, UserBrief>;

async fn load_briefs(store: &dyn Store, ids: HashSet<Uuid>) -> Result<Briefs, BackendError> {
    let ids: Vec<Uuid> = ids.into_iter().collect();
    Ok(store
        .user_briefs(&ids)
        .await?
        .into_iter()
        .map(|brief| (brief.id, brief))
        .collect())
}

fn summary(briefs: &Briefs, id: Uuid) -> Result<UserSummary, BackendError> {
    briefs
        .get(&id)
        .map(|brief| UserSummary {
            id,
            username: brief.username.clone(),
        })
        .ok_or_else(|| BackendError::internal(format!("dangling user reference {}", id)))
}

fn comment_views(briefs: &Briefs, comments: Vec<CommentRecord>) -> Result<Vec<CommentView>, BackendError> {
    comments
        .into_iter()
        .map(|comment| {
            Ok(CommentView {
                id: comment.id,
                user: summary(briefs, comment.user_id)?,
                text: comment.text,
                created_at: comment.created_at,
            })
        })
        .collect()
}

fn poem_view(briefs: &Briefs, poem: PoemRecord) -> Result<PoemView, BackendError> {
    let author = briefs.get(&poem.author_id).ok_or_else(|| {
        BackendError::internal(format!("poem {} has dangling author {}", poem.id, poem.author_id))
    })?;

    Ok(PoemView {
        author: AuthorSummary {
            id: author.id,
            username: author.username.clone(),
            profile: AuthorProfile {
                first_name: author.profile.first_name.clone(),
                last_name: author.profile.last_name.clone(),
            },
        },
        likes: poem.likes.into_iter().map(|user| LikeView { user }).collect(),
        comments: comment_views(briefs, poem.comments)?,
        id: poem.id,
        title: poem.title,
        content: poem.content,
        category: poem.category,
        tags: poem.tags,
        is_published: poem.is_published,
        created_at: poem.created_at,
        updated_at: poem.updated_at,
    })
}

/// Attach author and comment-author summaries to a batch of poems
async fn populate(store: &dyn Store, poems: Vec<PoemRecord>) -> Result<Vec<PoemView>, BackendError> {
    let mut ids = HashSet::new();
    for poem in &poems {
        ids.insert(poem.author_id);
        ids.extend(poem.comments.iter().map(|c| c.user_id));
    }
    let briefs = load_briefs(store, ids).await?;
    poems.into_iter().map(|poem| poem_view(&briefs, poem)).collect()
}

async fn populate_one(store: &dyn Store, poem: PoemRecord) -> Result<PoemView, BackendError> {
    populate(store, vec![poem])
        .await?
        .pop()
        .ok_or_else(|| BackendError::internal("populate returned no poem"))
}

/// Load a poem the requester is allowed to modify
async fn owned_poem(store: &dyn Store, id: Uuid, requester_id: Uuid) -> Result<PoemRecord, BackendError> {
    let poem = store
        .find_poem(id)
        .await?
        .ok_or_else(|| BackendError::not_found(POEM_NOT_FOUND))?;
    if poem.author_id != requester_id {
        tracing::warn!(poem_id = %id, %requester_id, "Rejected modification by non-author");
        return Err(BackendError::forbidden(NOT_AUTHORIZED));
    }
    Ok(poem)
}

/// Published poems, newest first.
///
/// An author listing their own poems (`author_id == viewer_id`) also sees
/// their drafts.
pub async fn list_poems(
    store: &dyn Store,
    page: PageRequest,
    author_id: Option<Uuid>,
    viewer_id: Option<Uuid>,
) -> Result<PoemListResponse, BackendError> {
    let filter = PoemFilter {
        author_id,
        include_drafts: author_id.is_some() && author_id == viewer_id,
        offset: page.offset(),
        limit: page.limit,
    };
    let (poems, total) = store.list_poems(filter).await?;

    Ok(PoemListResponse {
        poems: populate(store, poems).await?,
        pagination: page.pagination(total),
    })
}

pub async fn create_poem(
    store: &dyn Store,
    author_id: Uuid,
    fields: ValidPoem,
) -> Result<PoemView, BackendError> {
    let poem = store
        .insert_poem(NewPoem {
            author_id,
            title: fields.title,
            content: fields.content,
            category: fields.category,
            tags: fields.tags,
            is_published: fields.is_published,
        })
        .await?;
    tracing::info!(poem_id = %poem.id, %author_id, "Poem created");
    populate_one(store, poem).await
}

pub async fn get_poem(store: &dyn Store, id: Uuid) -> Result<PoemView, BackendError> {
    let poem = store
        .find_poem(id)
        .await?
        .ok_or_else(|| BackendError::not_found(POEM_NOT_FOUND))?;
    populate_one(store, poem).await
}

pub async fn update_poem(
    store: &dyn Store,
    id: Uuid,
    requester_id: Uuid,
    changes: PoemChanges,
) -> Result<PoemView, BackendError> {
    owned_poem(store, id, requester_id).await?;
    let poem = store
        .update_poem(id, changes)
        .await?
        .ok_or_else(|| BackendError::not_found(POEM_NOT_FOUND))?;
    populate_one(store, poem).await
}

pub async fn delete_poem(
    store: &dyn Store,
    id: Uuid,
    requester_id: Uuid,
) -> Result<MessageResponse, BackendError> {
    owned_poem(store, id, requester_id).await?;
    if !store.delete_poem(id).await? {
        return Err(BackendError::not_found(POEM_NOT_FOUND));
    }
    tracing::info!(poem_id = %id, "Poem deleted");
    Ok(MessageResponse::new("Poem deleted"))
}

pub async fn toggle_like(store: &dyn Store, id: Uuid, user_id: Uuid) -> Result<LikeResponse, BackendError> {
    let toggle = store
        .toggle_like(id, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found(POEM_NOT_FOUND))?;
    Ok(LikeResponse {
        likes: toggle.likes,
        is_liked: toggle.liked,
    })
}

/// Append a comment and return the full, populated comment list
pub async fn add_comment(
    store: &dyn Store,
    id: Uuid,
    user_id: Uuid,
    text: String,
) -> Result<Vec<CommentView>, BackendError> {
    let comments = store
        .append_comment(id, NewComment { user_id, text })
        .await?
        .ok_or_else(|| BackendError::not_found(POEM_NOT_FOUND))?;
    let briefs = load_briefs(store, comments.iter().map(|c| c.user_id).collect()).await?;
    comment_views(&briefs, comments)
}
