//! Poetica API Client
//!
//! Async functions for every REST endpoint. The bearer token is read from
//! the injected [`SessionHandle`] when each request is built, so the client
//! always follows the current session.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::egui_app::config::Config;
use crate::egui_app::session::{current_token, SessionHandle};
use crate::shared::{
    AuthResponse, CommentRequest, CommentView, CreatePoemRequest, FollowResponse, LikeResponse,
    LoginRequest, MessageResponse, PageRequest, PoemListResponse, PoemView, RegisterRequest,
    UpdatePoemRequest, UpdateProfileRequest, UserView,
};

/// Page size used when collecting every poem of one author
pub const AUTHOR_PAGE_SIZE: u32 = 50;

/// Shown when the server did not provide a message of its own
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Client-side errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server responded {status}: {message}")]
    Server { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    Decode(String),

    #[error("failed to start request runtime: {0}")]
    Runtime(String),
}

impl ApiError {
    /// Text to show in the UI
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    message: String,
}

/// HTTP client for the Poetica API
#[derive(Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
    session: SessionHandle,
}

impl ApiClient {
    pub fn new(config: Config, session: SessionHandle) -> Self {
        Self {
            config,
            client: Client::new(),
            session,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    // =========================================================================
    // Auth
    // =========================================================================

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        send(self.request(Method::POST, "/auth/register").json(request)).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        send(self.request(Method::POST, "/auth/login").json(request)).await
    }

    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        send(self.request(Method::POST, "/auth/logout")).await
    }

    /// The user behind the current token
    pub async fn me(&self) -> Result<UserView, ApiError> {
        send(self.request(Method::GET, "/auth/me")).await
    }

    // =========================================================================
    // Poems
    // =========================================================================

    /// Published poems, newest first, optionally limited to one author
    pub async fn list_poems(
        &self,
        page: PageRequest,
        author_id: Option<Uuid>,
    ) -> Result<PoemListResponse, ApiError> {
        let mut query = vec![
            ("page", page.page.to_string()),
            ("limit", page.limit.to_string()),
        ];
        if let Some(author_id) = author_id {
            query.push(("authorId", author_id.to_string()));
        }
        send(self.request(Method::GET, "/poems").query(&query)).await
    }

    /// Every poem of one author, newest first, fetched page by page.
    ///
    /// Includes the author's drafts when the session belongs to them.
    pub async fn list_all_poems_by(&self, author_id: Uuid) -> Result<Vec<PoemView>, ApiError> {
        let mut poems = Vec::new();
        let mut page = 1;
        loop {
            let batch = self
                .list_poems(PageRequest::new(page, AUTHOR_PAGE_SIZE), Some(author_id))
                .await?;
            let last = batch.poems.is_empty() || page >= batch.pagination.pages;
            poems.extend(batch.poems);
            if last {
                return Ok(poems);
            }
            page += 1;
        }
    }

    pub async fn create_poem(&self, request: &CreatePoemRequest) -> Result<PoemView, ApiError> {
        send(self.request(Method::POST, "/poems").json(request)).await
    }

    pub async fn get_poem(&self, id: Uuid) -> Result<PoemView, ApiError> {
        send(self.request(Method::GET, &format!("/poems/{}", id))).await
    }

    pub async fn update_poem(
        &self,
        id: Uuid,
        request: &UpdatePoemRequest,
    ) -> Result<PoemView, ApiError> {
        send(self.request(Method::PUT, &format!("/poems/{}", id)).json(request)).await
    }

    pub async fn delete_poem(&self, id: Uuid) -> Result<MessageResponse, ApiError> {
        send(self.request(Method::DELETE, &format!("/poems/{}", id))).await
    }

    pub async fn like_poem(&self, id: Uuid) -> Result<LikeResponse, ApiError> {
        send(self.request(Method::POST, &format!("/poems/{}/like", id))).await
    }

    /// Returns the poem's full comment list after the append
    pub async fn comment_on_poem(
        &self,
        id: Uuid,
        request: &CommentRequest,
    ) -> Result<Vec<CommentView>, ApiError> {
        send(self.request(Method::POST, &format!("/poems/{}/comment", id)).json(request)).await
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn get_profile(&self) -> Result<UserView, ApiError> {
        send(self.request(Method::GET, "/users/profile")).await
    }

    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UserView, ApiError> {
        send(self.request(Method::PUT, "/users/profile").json(request)).await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<UserView, ApiError> {
        send(self.request(Method::GET, &format!("/users/{}", id))).await
    }

    pub async fn follow_user(&self, id: Uuid) -> Result<FollowResponse, ApiError> {
        send(self.request(Method::POST, &format!("/users/follow/{}", id))).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.config.api_url(path));
        match current_token(&self.session) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    let response = builder.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or_default().to_string());
        tracing::debug!("Request failed with {}: {}", status, message);
        return Err(ApiError::Server {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}
