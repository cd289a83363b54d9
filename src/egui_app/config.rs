use std::path::{Path, PathBuf};

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Environment variable overriding the server URL
const API_URL_VAR: &str = "POETICA_API_URL";

/// Application configuration wrapper.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}

impl Config {
    /// Create a new configuration from the environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the configuration through `lookup`.
    ///
    /// An unusable server URL is logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let server_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let session_file = default_session_file();

        let mut builder = AppConfig::builder().server_url(server_url.clone());
        if let Some(path) = &session_file {
            builder = builder.session_file(path.clone());
        }

        match builder.build() {
            Ok(app) => Self { app },
            Err(e) => {
                tracing::warn!("Ignoring {}={}: {}", API_URL_VAR, server_url, e);
                Self {
                    app: AppConfig {
                        server_url: Some(DEFAULT_SERVER_URL.to_string()),
                        session_file,
                    },
                }
            }
        }
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Where the session token is persisted, if anywhere
    pub fn session_file(&self) -> Option<&Path> {
        self.app.session_file.as_deref()
    }
}

fn default_session_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("poetica").join("session.json"))
}
