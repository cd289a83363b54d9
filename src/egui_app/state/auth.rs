/**
 * Authentication State
 *
 * Login/register form state, client-side checks, and the handlers that
 * start the requests and begin the session when they succeed.
 */

use crate::egui_app::api::ApiError;
use crate::egui_app::state::AppState;
use crate::egui_app::task::Pending;
use crate::egui_app::types::AppView;
use crate::shared::validation::{is_valid_email, MIN_PASSWORD_LEN, MIN_USERNAME_LEN};
use crate::shared::{LoginRequest, RegisterRequest};

/// Login/register form
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub is_signup_mode: bool,
    pub error: Option<String>,
    pub loading: bool,
}

impl AuthForm {
    pub fn validate_login(&self) -> Result<LoginRequest, String> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err("Email and password are required".to_string());
        }
        Ok(LoginRequest {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }

    pub fn validate_signup(&self) -> Result<RegisterRequest, String> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err("Username is required".to_string());
        }
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(format!(
                "Username must be at least {} characters",
                MIN_USERNAME_LEN
            ));
        }

        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err("Email and password are required".to_string());
        }
        if !is_valid_email(email) {
            return Err("Please enter a valid email address".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match".to_string());
        }

        Ok(RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }

    pub fn toggle_mode(&mut self) {
        self.is_signup_mode = !self.is_signup_mode;
        self.error = None;
        self.password.clear();
        self.confirm_password.clear();
    }
}

impl AppState {
    pub fn handle_login(&mut self) {
        let request = match self.auth_form.validate_login() {
            Ok(request) => request,
            Err(message) => {
                self.auth_form.error = Some(message);
                return;
            }
        };

        self.auth_form.loading = true;
        self.auth_form.error = None;

        let api = self.api.clone();
        self.auth_result = Some(Pending::spawn(move || async move {
            api.login(&request).await
        }));
    }

    pub fn handle_signup(&mut self) {
        let request = match self.auth_form.validate_signup() {
            Ok(request) => request,
            Err(message) => {
                self.auth_form.error = Some(message);
                return;
            }
        };

        self.auth_form.loading = true;
        self.auth_form.error = None;

        let api = self.api.clone();
        self.auth_result = Some(Pending::spawn(move || async move {
            api.register(&request).await
        }));
    }

    pub(super) fn check_auth_result(&mut self) {
        let Some(result) = self.auth_result.as_ref().and_then(Pending::poll) else {
            return;
        };
        self.auth_result = None;
        self.auth_form.loading = false;

        match result {
            Ok(auth) => {
                self.begin_session(auth);
                self.auth_form = AuthForm::default();
                self.navigate(AppView::Dashboard);
            }
            Err(e) => {
                tracing::warn!("Authentication failed: {}", e);
                self.auth_form.password.clear();
                self.auth_form.confirm_password.clear();
                self.auth_form.error = Some(e.user_message());
            }
        }
    }

    pub(super) fn check_restore_result(&mut self) {
        let Some(result) = self.restore_result.as_ref().and_then(Pending::poll) else {
            return;
        };
        self.restore_result = None;

        match result {
            Ok(user) => {
                tracing::info!("Session restored for {}", user.username);
                let token = self.session().token().map(str::to_string);
                if let Some(token) = token {
                    self.session
                        .write()
                        .unwrap_or_else(std::sync::PoisonError::into_inner)
                        .begin(token, user);
                }
            }
            Err(ApiError::Server { status, message }) if status == 401 || status == 404 => {
                tracing::info!("Saved session rejected: {}", message);
                self.end_session();
            }
            Err(e) => {
                // Keep the saved token for the next start; this run continues signed out.
                tracing::warn!("Could not verify saved session: {}", e);
                self.session
                    .write()
                    .unwrap_or_else(std::sync::PoisonError::into_inner)
                    .end();
            }
        }
    }
}
