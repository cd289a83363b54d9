/**
 * Poem State
 *
 * Listing, detail, dashboard and poem-form state, plus the `AppState`
 * handlers that load poems and run like/comment/delete/save requests.
 */

use uuid::Uuid;

use crate::egui_app::state::AppState;
use crate::egui_app::task::Pending;
use crate::egui_app::types::{AppView, Loadable};
use crate::shared::validation::parse_tags;
use crate::shared::{
    Category, CommentRequest, CommentView, CreatePoemRequest, LikeResponse, LikeView,
    MessageResponse, PageRequest, PoemListResponse, PoemView, UpdatePoemRequest,
};

/// Poems per listing page
pub const LISTING_PAGE_SIZE: u32 = 10;

/// Home listing
pub struct ListingState {
    pub page: u32,
    pub data: Loadable<PoemListResponse>,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            page: 1,
            data: Loadable::NotStarted,
        }
    }
}

/// Poem detail view
#[derive(Default)]
pub struct DetailState {
    pub poem: Loadable<PoemView>,
    pub comment_input: String,
    pub action_error: Option<String>,
    pub confirm_delete: bool,
    like: Option<Pending<LikeResponse>>,
    comment: Option<Pending<Vec<CommentView>>>,
    delete: Option<Pending<MessageResponse>>,
}

impl DetailState {
    fn loaded(poem: PoemView) -> Self {
        Self {
            poem: Loadable::Loaded(poem),
            ..Self::default()
        }
    }

    pub fn is_liking(&self) -> bool {
        self.like.is_some()
    }

    pub fn is_commenting(&self) -> bool {
        self.comment.is_some()
    }

    pub fn is_deleting(&self) -> bool {
        self.delete.is_some()
    }
}

/// Create/edit poem form
pub struct PoemForm {
    /// The poem being edited, `None` when creating
    pub editing: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub category: Category,
    /// Comma-separated tags
    pub tags_input: String,
    pub is_published: bool,
    pub error: Option<String>,
    source: Option<Pending<PoemView>>,
    submit: Option<Pending<PoemView>>,
}

impl Default for PoemForm {
    fn default() -> Self {
        Self {
            editing: None,
            title: String::new(),
            content: String::new(),
            category: Category::default(),
            tags_input: String::new(),
            is_published: true,
            error: None,
            source: None,
            submit: None,
        }
    }
}

impl PoemForm {
    /// Pre-fill the form with a poem to edit
    pub fn fill_from(&mut self, poem: &PoemView) {
        self.editing = Some(poem.id);
        self.title = poem.title.clone();
        self.content = poem.content.clone();
        self.category = poem.category;
        self.tags_input = poem.tags.join(", ");
        self.is_published = poem.is_published;
        self.error = None;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        if self.content.trim().is_empty() {
            return Err("Content is required".to_string());
        }
        Ok(())
    }

    pub fn create_request(&self) -> CreatePoemRequest {
        CreatePoemRequest {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            category: Some(self.category.as_str().to_string()),
            tags: parse_tags(&self.tags_input),
            is_published: Some(self.is_published),
        }
    }

    pub fn update_request(&self) -> UpdatePoemRequest {
        UpdatePoemRequest {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
            category: Some(self.category.as_str().to_string()),
            tags: Some(parse_tags(&self.tags_input)),
            is_published: Some(self.is_published),
        }
    }

    pub fn is_loading_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_some()
    }
}

/// Reflect a like toggle in a poem the view already holds
pub fn apply_like(poem: &mut PoemView, user_id: Uuid, response: LikeResponse) {
    poem.likes.retain(|like| like.user != user_id);
    if response.is_liked {
        poem.likes.push(LikeView { user: user_id });
    }
}

impl AppState {
    pub(super) fn load_listing(&mut self) {
        let page = PageRequest::new(self.listing.page, LISTING_PAGE_SIZE);
        let api = self.api.clone();
        self.listing.data = Loadable::Loading(Pending::spawn(move || async move {
            api.list_poems(page, None).await
        }));
    }

    /// Jump to another listing page
    pub fn set_listing_page(&mut self, page: u32) {
        self.listing.page = page.max(1);
        self.load_listing();
    }

    pub(super) fn load_poem(&mut self, id: Uuid) {
        let api = self.api.clone();
        self.detail = DetailState {
            poem: Loadable::Loading(Pending::spawn(move || async move { api.get_poem(id).await })),
            ..DetailState::default()
        };
    }

    pub(super) fn load_dashboard(&mut self) {
        let Some(user_id) = self.current_user_id() else {
            return;
        };
        let api = self.api.clone();
        self.dashboard = Loadable::Loading(Pending::spawn(move || async move {
            api.list_all_poems_by(user_id).await
        }));
    }

    pub(super) fn load_poem_form(&mut self, id: Uuid) {
        self.poem_form = PoemForm::default();
        if let Some(poem) = self.detail.poem.value().filter(|poem| poem.id == id) {
            self.poem_form.fill_from(poem);
            return;
        }

        self.poem_form.editing = Some(id);
        let api = self.api.clone();
        self.poem_form.source = Some(Pending::spawn(move || async move { api.get_poem(id).await }));
    }

    pub fn toggle_like(&mut self) {
        if !self.is_authenticated() {
            self.auth_form.error = Some("Please log in to like poems".to_string());
            self.current_view = AppView::Auth;
            return;
        }
        let Some(id) = self.detail.poem.value().map(|poem| poem.id) else {
            return;
        };
        if self.detail.is_liking() {
            return;
        }

        self.detail.action_error = None;
        let api = self.api.clone();
        self.detail.like = Some(Pending::spawn(move || async move { api.like_poem(id).await }));
    }

    pub fn submit_comment(&mut self) {
        let Some(id) = self.detail.poem.value().map(|poem| poem.id) else {
            return;
        };
        let text = self.detail.comment_input.trim().to_string();
        if text.is_empty() {
            self.detail.action_error = Some("Comment cannot be empty".to_string());
            return;
        }

        self.detail.action_error = None;
        let api = self.api.clone();
        self.detail.comment = Some(Pending::spawn(move || async move {
            api.comment_on_poem(id, &CommentRequest { text }).await
        }));
    }

    pub fn delete_poem(&mut self) {
        let Some(id) = self.detail.poem.value().map(|poem| poem.id) else {
            return;
        };
        self.detail.confirm_delete = false;
        self.detail.action_error = None;
        let api = self.api.clone();
        self.detail.delete = Some(Pending::spawn(move || async move { api.delete_poem(id).await }));
    }

    pub fn submit_poem_form(&mut self) {
        if let Err(message) = self.poem_form.validate() {
            self.poem_form.error = Some(message);
            return;
        }

        self.poem_form.error = None;
        let api = self.api.clone();
        let pending = match self.poem_form.editing {
            Some(id) => {
                let request = self.poem_form.update_request();
                Pending::spawn(move || async move { api.update_poem(id, &request).await })
            }
            None => {
                let request = self.poem_form.create_request();
                Pending::spawn(move || async move { api.create_poem(&request).await })
            }
        };
        self.poem_form.submit = Some(pending);
    }

    pub(super) fn check_detail_operations(&mut self) {
        self.detail.poem.poll();

        if let Some(result) = self.detail.like.as_ref().and_then(Pending::poll) {
            self.detail.like = None;
            match result {
                Ok(response) => {
                    let user_id = self.current_user_id();
                    if let (Some(poem), Some(user_id)) = (self.detail.poem.value_mut(), user_id) {
                        apply_like(poem, user_id, response);
                    }
                }
                Err(e) => self.detail.action_error = Some(e.user_message()),
            }
        }

        if let Some(result) = self.detail.comment.as_ref().and_then(Pending::poll) {
            self.detail.comment = None;
            match result {
                Ok(comments) => {
                    if let Some(poem) = self.detail.poem.value_mut() {
                        poem.comments = comments;
                    }
                    self.detail.comment_input.clear();
                }
                Err(e) => self.detail.action_error = Some(e.user_message()),
            }
        }

        if let Some(result) = self.detail.delete.as_ref().and_then(Pending::poll) {
            self.detail.delete = None;
            match result {
                Ok(response) => {
                    tracing::info!("{}", response.message);
                    self.detail = DetailState::default();
                    self.navigate(AppView::Dashboard);
                }
                Err(e) => self.detail.action_error = Some(e.user_message()),
            }
        }
    }

    pub(super) fn check_poem_form_operations(&mut self) {
        if let Some(result) = self.poem_form.source.as_ref().and_then(Pending::poll) {
            self.poem_form.source = None;
            match result {
                Ok(poem) if Some(poem.author.id) != self.current_user_id() => {
                    self.poem_form.error = Some("You can only edit your own poems".to_string());
                }
                Ok(poem) => self.poem_form.fill_from(&poem),
                Err(e) => self.poem_form.error = Some(e.user_message()),
            }
        }

        if let Some(result) = self.poem_form.submit.as_ref().and_then(Pending::poll) {
            self.poem_form.submit = None;
            match result {
                Ok(poem) => {
                    tracing::info!("Saved poem {}", poem.id);
                    self.poem_form = PoemForm::default();
                    self.current_view = AppView::Detail(poem.id);
                    self.detail = DetailState::loaded(poem);
                }
                Err(e) => self.poem_form.error = Some(e.user_message()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::shared::{AuthorProfile, AuthorSummary};

    fn poem() -> PoemView {
        PoemView {
            id: Uuid::new_v4(),
            title: "The Tyger".to_string(),
            content: "Tyger Tyger, burning bright".to_string(),
            category: Category::Nature,
            tags: vec!["blake".to_string(), "songs".to_string()],
            author: AuthorSummary {
                id: Uuid::new_v4(),
                username: "blake".to_string(),
                profile: AuthorProfile::default(),
            },
            is_published: false,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_like_adds_and_removes() {
        let mut poem = poem();
        let user = Uuid::new_v4();

        apply_like(&mut poem, user, LikeResponse { likes: 1, is_liked: true });
        assert!(poem.is_liked_by(user));
        assert_eq!(poem.likes.len(), 1);

        apply_like(&mut poem, user, LikeResponse { likes: 0, is_liked: false });
        assert!(!poem.is_liked_by(user));
        assert!(poem.likes.is_empty());
    }

    #[test]
    fn test_apply_like_never_duplicates() {
        let mut poem = poem();
        let user = Uuid::new_v4();
        apply_like(&mut poem, user, LikeResponse { likes: 1, is_liked: true });
        apply_like(&mut poem, user, LikeResponse { likes: 1, is_liked: true });
        assert_eq!(poem.likes.len(), 1);
    }

    #[test]
    fn test_fill_from_poem() {
        let poem = poem();
        let mut form = PoemForm::default();
        form.fill_from(&poem);
        assert_eq!(form.editing, Some(poem.id));
        assert_eq!(form.tags_input, "blake, songs");
        assert_eq!(form.category, Category::Nature);
        assert!(!form.is_published);
    }

    #[test]
    fn test_form_requires_title_and_content() {
        let mut form = PoemForm::default();
        assert_eq!(form.validate().unwrap_err(), "Title is required");
        form.title = "Dusk".to_string();
        form.content = "   ".to_string();
        assert_eq!(form.validate().unwrap_err(), "Content is required");
        form.content = "the light goes".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_create_request_parses_tags() {
        let form = PoemForm {
            title: "  Dusk ".to_string(),
            content: "the light goes\n".to_string(),
            category: Category::Life,
            tags_input: "evening, , light ".to_string(),
            ..PoemForm::default()
        };
        let request = form.create_request();
        assert_eq!(request.title, "Dusk");
        assert_eq!(request.content, "the light goes\n");
        assert_eq!(request.category.as_deref(), Some("life"));
        assert_eq!(request.tags, vec!["evening".to_string(), "light".to_string()]);
        assert_eq!(request.is_published, Some(true));
    }

    #[test]
    fn test_update_request_carries_publication_flag() {
        let mut form = PoemForm::default();
        form.fill_from(&poem());
        assert_eq!(form.update_request().is_published, Some(false));

        form.is_published = true;
        let request = form.update_request();
        assert_eq!(request.is_published, Some(true));
        assert_eq!(request.tags, Some(vec!["blake".to_string(), "songs".to_string()]));
    }
}
