/**
 * Server Initialization
 *
 * Builds the store and the router from a `ServerConfig`.
 *
 * # Initialization Process
 *
 * 1. Connect to PostgreSQL if `DATABASE_URL` is set (migrations included);
 *    a failure here is returned, never papered over
 * 2. Use the in-memory store when no `DATABASE_URL` is configured
 * 3. Create the application state and the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig, StartupError};
use crate::backend::server::state::{AppState, DynStore};
use crate::backend::store::{MemoryStore, PgStore};

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing Poetica backend server");

    let store: DynStore = match config.database_url.as_deref() {
        Some(url) => {
            let pool = load_database(url).await?;
            tracing::info!("Using PostgreSQL store");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Using the in-memory store; data is lost on restart.");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(app_with_store(store, config))
}

/// Build the router over an existing store
pub fn app_with_store(store: DynStore, config: ServerConfig) -> Router<()> {
    let app_state = AppState::new(store, config);
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_configured_database_failure_aborts_startup() {
        let config = ServerConfig {
            database_url: Some("postgres://poetica@127.0.0.1:not-a-port/poetica".to_string()),
            ..ServerConfig::default()
        };
        assert!(matches!(create_app(config).await, Err(StartupError::Connect(_))));
    }

    #[tokio::test]
    async fn test_no_database_url_uses_memory_store() {
        assert!(create_app(ServerConfig::default()).await.is_ok());
    }
}
