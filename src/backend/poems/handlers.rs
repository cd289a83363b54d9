/**
 * Poem Handlers
 *
 * - `GET /poems?page&limit&authorId` - published poems, newest first; an
 *   author listing their own poems also gets their drafts
 * - `POST /poems` (auth) - create, 201
 * - `GET /poems/{id}` - one poem
 * - `PUT /poems/{id}` (auth, author) - update title, content, category, tags,
 *   publication
 * - `DELETE /poems/{id}` (auth, author)
 * - `POST /poems/{id}/like` (auth) - like toggle
 * - `POST /poems/{id}/comment` (auth) - append a comment
 *
 * Handlers validate input, then delegate to `service`.
 */

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::extract::{ApiJson, ApiQuery};
use crate::backend::middleware::{AuthUser, MaybeAuthUser};
use crate::backend::poems::service;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::DynStore;
use crate::backend::validation::{
    parse_id, validate_comment, validate_new_poem, validate_poem_update,
};
use crate::shared::{
    CommentRequest, CommentView, CreatePoemRequest, LikeResponse, MessageResponse, PageRequest,
    PoemListResponse, PoemView, SharedError, UpdatePoemRequest,
};

const POEM_NOT_FOUND: &str = "Poem not found";

/// Raw listing query. Values stay strings so that garbage falls back to
/// the defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub author_id: Option<String>,
}

pub async fn list_poems(
    State(store): State<DynStore>,
    State(config): State<Arc<ServerConfig>>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<PoemListResponse>, BackendError> {
    let page = PageRequest::from_query(
        query.page.as_deref(),
        query.limit.as_deref(),
        config.max_page_limit,
    );

    let author_id = match query.author_id.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        Some(raw) => Some(
            uuid::Uuid::parse_str(raw)
                .map_err(|_| SharedError::validation("authorId", "Invalid author id"))?,
        ),
        None => None,
    };

    let viewer_id = viewer.map(|v| v.user_id);
    Ok(Json(service::list_poems(store.as_ref(), page, author_id, viewer_id).await?))
}

pub async fn create_poem(
    State(store): State<DynStore>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreatePoemRequest>,
) -> Result<(StatusCode, Json<PoemView>), BackendError> {
    let fields = validate_new_poem(request)?;
    let poem = service::create_poem(store.as_ref(), user.user_id, fields).await?;
    Ok((StatusCode::CREATED, Json(poem)))
}

pub async fn get_poem(
    State(store): State<DynStore>,
    Path(id): Path<String>,
) -> Result<Json<PoemView>, BackendError> {
    let id = parse_id(&id, POEM_NOT_FOUND)?;
    Ok(Json(service::get_poem(store.as_ref(), id).await?))
}

pub async fn update_poem(
    State(store): State<DynStore>,
    Path(id): Path<String>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<UpdatePoemRequest>,
) -> Result<Json<PoemView>, BackendError> {
    let id = parse_id(&id, POEM_NOT_FOUND)?;
    let changes = validate_poem_update(request)?;
    Ok(Json(service::update_poem(store.as_ref(), id, user.user_id, changes).await?))
}

pub async fn delete_poem(
    State(store): State<DynStore>,
    Path(id): Path<String>,
    AuthUser(user): AuthUser,
) -> Result<Json<MessageResponse>, BackendError> {
    let id = parse_id(&id, POEM_NOT_FOUND)?;
    Ok(Json(service::delete_poem(store.as_ref(), id, user.user_id).await?))
}

pub async fn like_poem(
    State(store): State<DynStore>,
    Path(id): Path<String>,
    AuthUser(user): AuthUser,
) -> Result<Json<LikeResponse>, BackendError> {
    let id = parse_id(&id, POEM_NOT_FOUND)?;
    Ok(Json(service::toggle_like(store.as_ref(), id, user.user_id).await?))
}

pub async fn comment_on_poem(
    State(store): State<DynStore>,
    Path(id): Path<String>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CommentRequest>,
) -> Result<Json<Vec<CommentView>>, BackendError> {
    let id = parse_id(&id, POEM_NOT_FOUND)?;
    let text = validate_comment(request)?;
    Ok(Json(service::add_comment(store.as_ref(), id, user.user_id, text).await?))
}
