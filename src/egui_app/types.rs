/**
 * Shared Types Module
 *
 * Defines the app view enum and the loading state each view renders from.
 */

use uuid::Uuid;

use crate::egui_app::task::Pending;

/// Current app view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    /// Login/register screen
    Auth,
    /// Home: paginated published poems
    Listing,
    /// One poem with likes and comments
    Detail(Uuid),
    /// The signed-in user's poems and stats
    Dashboard,
    /// A user's public profile and poems
    Profile(Uuid),
    CreatePoem,
    EditPoem(Uuid),
    EditProfile,
}

impl AppView {
    /// Views that need a signed-in user
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            AppView::Dashboard | AppView::CreatePoem | AppView::EditPoem(_) | AppView::EditProfile
        )
    }
}

/// Data a view fetches when it opens
pub enum Loadable<T> {
    NotStarted,
    Loading(Pending<T>),
    Loaded(T),
    Failed(String),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::NotStarted
    }
}

impl<T: Send + 'static> Loadable<T> {
    /// Move from `Loading` to `Loaded`/`Failed` once the request finishes.
    /// Returns whether the state changed.
    pub fn poll(&mut self) -> bool {
        let Loadable::Loading(pending) = self else {
            return false;
        };
        let Some(result) = pending.poll() else {
            return false;
        };
        *self = match result {
            Ok(value) => Loadable::Loaded(value),
            Err(e) => {
                tracing::warn!("Load failed: {}", e);
                Loadable::Failed(e.user_message())
            }
        };
        true
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading(_))
    }
}
