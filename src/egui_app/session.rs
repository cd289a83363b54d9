/**
 * Client Session
 *
 * The signed-in identity of the desktop client. One `Session` is owned by
 * `AppState` and shared with the `ApiClient` through a `SessionHandle`;
 * `begin` runs after login/register and `end` at logout. The token is
 * persisted by `SessionStore` so a restart can resume the session.
 */

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::UserView;

/// Current authentication state
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    user: Option<UserView>,
}

/// Shared handle to the session
pub type SessionHandle = Arc<RwLock<Session>>;

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(self) -> SessionHandle {
        Arc::new(RwLock::new(self))
    }

    /// Start an authenticated session
    pub fn begin(&mut self, token: String, user: UserView) {
        self.token = Some(token);
        self.user = Some(user);
    }

    /// Hold a restored token until its user has been confirmed
    pub fn resume(&mut self, token: String) {
        self.token = Some(token);
        self.user = None;
    }

    /// Drop the token and the user
    pub fn end(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserView> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Replace the cached user record, e.g. after a profile update
    pub fn set_user(&mut self, user: UserView) {
        if self.token.is_some() {
            self.user = Some(user);
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

/// Read the token out of a handle, tolerating a poisoned lock
pub fn current_token(handle: &SessionHandle) -> Option<String> {
    handle
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .token()
        .map(str::to_string)
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
}

/// Persists the session token as JSON between runs
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: Option<PathBuf>,
}

impl SessionStore {
    /// `None` disables persistence
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }

    pub fn load(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let raw = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(saved) => Some(saved.token),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, token: &str) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string(&PersistedSession {
            token: token.to_string(),
        })?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path)?;
        // `mode` only applies on creation; tighten a file left by an older run
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(body.as_bytes())
    }

    pub fn clear(&self) -> std::io::Result<()> {
        match &self.path {
            Some(path) if path.exists() => std::fs::remove_file(path),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> UserView {
        UserView {
            id: Uuid::new_v4(),
            username: "rumi".to_string(),
            email: "rumi@example.com".to_string(),
            profile: Default::default(),
            followers: Vec::new(),
            following: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_begin_and_end() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());

        let user = user();
        let id = user.id;
        session.begin("token".to_string(), user);
        assert!(session.is_authenticated());
        assert_eq!(session.user_id(), Some(id));

        session.end();
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_resumed_session_is_not_authenticated_until_confirmed() {
        let mut session = Session::new();
        session.resume("token".to_string());
        assert_eq!(session.token(), Some("token"));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_set_user_requires_token() {
        let mut session = Session::new();
        session.set_user(user());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_current_token_reads_handle() {
        let handle = Session::new().handle();
        assert_eq!(current_token(&handle), None);
        handle.write().unwrap().begin("abc".to_string(), user());
        assert_eq!(current_token(&handle).as_deref(), Some("abc"));
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let store = SessionStore::new(Some(&path));

        assert_eq!(store.load(), None);
        store.save("secret-token").unwrap();
        assert_eq!(store.load().as_deref(), Some("secret-token"));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_token_is_private_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        SessionStore::new(Some(&path)).save("secret-token").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(SessionStore::new(Some(&path)).load().as_deref(), Some("secret-token"));
    }

    #[test]
    fn test_store_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(SessionStore::new(Some(&path)).load(), None);
    }

    #[test]
    fn test_disabled_store() {
        let store = SessionStore::new(None);
        store.save("token").unwrap();
        assert_eq!(store.load(), None);
        store.clear().unwrap();
    }
}
