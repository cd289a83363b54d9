/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct holds:
 * - The document store (`Arc<dyn Store>`, PostgreSQL or in-memory)
 * - The server configuration (token secret and lifetime, bcrypt cost,
 *   page limit cap)
 *
 * Both are behind `Arc`, so cloning the state per request is cheap.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use poetica::backend::server::state::AppState;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let limit = state.config.max_page_limit;
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::server::config::ServerConfig;
use crate::backend::store::Store;

/// Shared store handle
pub type DynStore = Arc<dyn Store>;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: DynStore,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: DynStore, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for DynStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
