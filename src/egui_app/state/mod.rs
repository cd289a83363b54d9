//! Application State
//!
//! `AppState` is the composition root of the desktop client. It owns the
//! configuration, the [`Session`] and the [`ApiClient`] the session is
//! injected into, plus the per-view state. Views call its methods to start
//! requests; `check_pending_operations` runs once per frame and folds
//! finished requests back in.

use std::sync::{PoisonError, RwLockReadGuard};

use uuid::Uuid;

use crate::egui_app::api::ApiClient;
use crate::egui_app::config::Config;
use crate::egui_app::session::{Session, SessionHandle, SessionStore};
use crate::egui_app::task::Pending;
use crate::egui_app::types::{AppView, Loadable};
use crate::shared::{AuthResponse, PoemView, UserSummary, UserView};

pub mod auth;
pub mod poems;
pub mod users;

pub use auth::AuthForm;
pub use poems::{DetailState, ListingState, PoemForm};
pub use users::{ProfileForm, ProfileState};

/// Central application state shared across egui views.
pub struct AppState {
    pub config: Config,
    pub api: ApiClient,
    session: SessionHandle,
    session_store: SessionStore,

    pub current_view: AppView,
    pub auth_form: AuthForm,
    auth_result: Option<Pending<AuthResponse>>,
    restore_result: Option<Pending<UserView>>,

    pub listing: ListingState,
    pub detail: DetailState,
    pub dashboard: Loadable<Vec<PoemView>>,
    pub profile: ProfileState,
    pub poem_form: PoemForm,
    pub profile_form: ProfileForm,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_config(Config::new())
    }

    /// Build the state and resume a persisted session, if any
    pub fn with_config(config: Config) -> Self {
        let session = Session::new().handle();
        let session_store = SessionStore::new(config.session_file());
        let api = ApiClient::new(config.clone(), session.clone());

        let mut state = Self {
            config,
            api,
            session,
            session_store,
            current_view: AppView::Listing,
            auth_form: AuthForm::default(),
            auth_result: None,
            restore_result: None,
            listing: ListingState::default(),
            detail: DetailState::default(),
            dashboard: Loadable::NotStarted,
            profile: ProfileState::default(),
            poem_form: PoemForm::default(),
            profile_form: ProfileForm::default(),
        };
        tracing::info!("Using API server at {}", state.config.server_url());

        state.restore_session();
        state.navigate(AppView::Listing);
        state
    }

    // =========================================================================
    // Session
    // =========================================================================

    pub fn session(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn current_user_id(&self) -> Option<Uuid> {
        self.session().user_id()
    }

    /// `{id, username}` of the signed-in user
    pub fn current_user_summary(&self) -> Option<UserSummary> {
        self.session().user().map(|u| UserSummary {
            id: u.id,
            username: u.username.clone(),
        })
    }

    /// Whether a persisted token is still being checked against the server
    pub fn is_restoring(&self) -> bool {
        self.restore_result.is_some()
    }

    fn restore_session(&mut self) {
        let Some(token) = self.session_store.load() else {
            return;
        };
        tracing::info!("Resuming saved session");
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .resume(token);

        let api = self.api.clone();
        self.restore_result = Some(Pending::spawn(move || async move { api.me().await }));
    }

    /// A fresh sign-in replaces any saved session still being checked
    pub(crate) fn begin_session(&mut self, auth: AuthResponse) {
        tracing::info!("Signed in as {}", auth.user.username);
        self.restore_result = None;
        if let Err(e) = self.session_store.save(&auth.token) {
            tracing::warn!("Could not persist session: {}", e);
        }
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .begin(auth.token, auth.user);
    }

    pub(crate) fn end_session(&mut self) {
        self.restore_result = None;
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .end();
        if let Err(e) = self.session_store.clear() {
            tracing::warn!("Could not remove saved session: {}", e);
        }
    }

    pub(crate) fn update_session_user(&mut self, user: UserView) {
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set_user(user);
    }

    pub fn logout(&mut self) {
        let api = self.api.clone();
        // The server keeps no session state; the result is not awaited.
        let _ = Pending::spawn(move || async move { api.logout().await });

        self.end_session();
        self.auth_form = AuthForm::default();
        self.dashboard = Loadable::NotStarted;
        self.profile_form = ProfileForm::default();
        self.poem_form = PoemForm::default();
        self.navigate(AppView::Listing);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Switch views and start the reads the new view needs
    pub fn navigate(&mut self, view: AppView) {
        if view.requires_auth() && !self.is_authenticated() {
            self.auth_form.error = Some("Please log in to continue".to_string());
            self.current_view = AppView::Auth;
            return;
        }

        tracing::debug!("Navigating to {:?}", view);
        self.current_view = view;
        match view {
            AppView::Auth => {}
            AppView::Listing => self.load_listing(),
            AppView::Detail(id) => self.load_poem(id),
            AppView::Dashboard => self.load_dashboard(),
            AppView::Profile(id) => self.load_profile(id),
            AppView::CreatePoem => self.poem_form = PoemForm::default(),
            AppView::EditPoem(id) => self.load_poem_form(id),
            AppView::EditProfile => self.load_profile_form(),
        }
    }

    /// Fold finished requests into the state. Called once per frame.
    pub fn check_pending_operations(&mut self) {
        self.check_restore_result();
        self.check_auth_result();

        self.listing.data.poll();
        self.dashboard.poll();
        self.check_detail_operations();
        self.check_poem_form_operations();
        self.check_profile_operations();
        self.check_profile_form_operations();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
