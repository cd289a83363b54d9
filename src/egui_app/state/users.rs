/**
 * User State
 *
 * Profile view (user record and poems, fetched in parallel), the follow
 * toggle, and the edit-profile form.
 */

use uuid::Uuid;

use crate::egui_app::api::ApiError;
use crate::egui_app::state::AppState;
use crate::egui_app::task::Pending;
use crate::egui_app::types::{AppView, Loadable};
use crate::shared::{
    FollowResponse, PoemView, Profile, UpdateProfileRequest, UserSummary, UserView,
};

/// Profile view
#[derive(Default)]
pub struct ProfileState {
    pub user_id: Option<Uuid>,
    pub data: Loadable<(UserView, Vec<PoemView>)>,
    pub action_error: Option<String>,
    follow: Option<Pending<FollowResponse>>,
}

impl ProfileState {
    pub fn is_following_pending(&self) -> bool {
        self.follow.is_some()
    }
}

/// Edit-profile form
#[derive(Default)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub location: String,
    pub error: Option<String>,
    source: Option<Pending<UserView>>,
    submit: Option<Pending<UserView>>,
}

impl ProfileForm {
    pub fn fill_from(&mut self, profile: &Profile) {
        self.first_name = profile.first_name.clone().unwrap_or_default();
        self.last_name = profile.last_name.clone().unwrap_or_default();
        self.bio = profile.bio.clone().unwrap_or_default();
        self.location = profile.location.clone().unwrap_or_default();
        self.error = None;
    }

    /// Blank fields are sent as absent
    pub fn to_request(&self) -> UpdateProfileRequest {
        fn field(value: &str) -> Option<String> {
            Some(value.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        UpdateProfileRequest {
            profile: Profile {
                first_name: field(&self.first_name),
                last_name: field(&self.last_name),
                bio: field(&self.bio),
                location: field(&self.location),
            },
        }
    }

    pub fn is_loading_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_some()
    }
}

/// Reflect a follow toggle in the followed user's record
pub fn apply_follow(user: &mut UserView, follower: UserSummary, response: &FollowResponse) {
    user.followers.retain(|f| f.id != follower.id);
    if response.is_following {
        user.followers.push(follower);
    }
}

impl AppState {
    pub(super) fn load_profile(&mut self, id: Uuid) {
        let api = self.api.clone();
        self.profile = ProfileState {
            user_id: Some(id),
            data: Loadable::Loading(Pending::spawn(move || async move {
                let (user, poems) = tokio::try_join!(
                    api.get_user(id),
                    api.list_all_poems_by(id)
                )?;
                Ok::<_, ApiError>((user, poems))
            })),
            ..ProfileState::default()
        };
    }

    /// Follow or unfollow the user whose profile is open
    pub fn toggle_follow(&mut self) {
        if !self.is_authenticated() {
            self.auth_form.error = Some("Please log in to follow poets".to_string());
            self.current_view = AppView::Auth;
            return;
        }
        let Some(id) = self.profile.user_id else {
            return;
        };
        if self.profile.is_following_pending() {
            return;
        }

        self.profile.action_error = None;
        let api = self.api.clone();
        self.profile.follow = Some(Pending::spawn(move || async move { api.follow_user(id).await }));
    }

    pub(super) fn load_profile_form(&mut self) {
        self.profile_form = ProfileForm::default();
        let api = self.api.clone();
        self.profile_form.source = Some(Pending::spawn(move || async move { api.get_profile().await }));
    }

    pub fn submit_profile_form(&mut self) {
        if self.profile_form.is_submitting() {
            return;
        }
        self.profile_form.error = None;
        let request = self.profile_form.to_request();
        let api = self.api.clone();
        self.profile_form.submit = Some(Pending::spawn(move || async move {
            api.update_profile(&request).await
        }));
    }

    pub(super) fn check_profile_operations(&mut self) {
        self.profile.data.poll();

        if let Some(result) = self.profile.follow.as_ref().and_then(Pending::poll) {
            self.profile.follow = None;
            match result {
                Ok(response) => {
                    tracing::info!("{}", response.message);
                    let me = self.current_user_summary();
                    if let (Some((user, _)), Some(me)) = (self.profile.data.value_mut(), me) {
                        apply_follow(user, me, &response);
                    }
                }
                Err(e) => self.profile.action_error = Some(e.user_message()),
            }
        }
    }

    pub(super) fn check_profile_form_operations(&mut self) {
        if let Some(result) = self.profile_form.source.as_ref().and_then(Pending::poll) {
            self.profile_form.source = None;
            match result {
                Ok(user) => self.profile_form.fill_from(&user.profile),
                Err(e) => self.profile_form.error = Some(e.user_message()),
            }
        }

        if let Some(result) = self.profile_form.submit.as_ref().and_then(Pending::poll) {
            self.profile_form.submit = None;
            match result {
                Ok(user) => {
                    let id = user.id;
                    self.update_session_user(user);
                    self.navigate(AppView::Profile(id));
                }
                Err(e) => self.profile_form.error = Some(e.user_message()),
            }
        }
    }
}
