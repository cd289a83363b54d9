/**
 * Server Configuration
 *
 * Loads server settings from environment variables (after `dotenv` has
 * populated them from a `.env` file, if present) and connects the optional
 * PostgreSQL database.
 *
 * # Variables
 *
 * | Variable         | Default      | Meaning                                   |
 * |------------------|--------------|-------------------------------------------|
 * | `SERVER_PORT`    | `3000`       | TCP port to bind                          |
 * | `DATABASE_URL`   | unset        | PostgreSQL URL; unset means in-memory     |
 * | `JWT_SECRET`     | required     | HS256 signing secret                      |
 * | `POETICA_DEV`    | unset        | `1` allows a built-in development secret  |
 * | `TOKEN_TTL_DAYS` | `30`         | Token lifetime                            |
 * | `BCRYPT_COST`    | `12`         | bcrypt work factor                        |
 * | `MAX_PAGE_LIMIT` | `50`         | Upper bound for `?limit=`                 |
 * | `CORS_ORIGIN`    | unset        | Allowed origin; unset allows any          |
 *
 * # Error Handling
 *
 * Malformed values and a missing secret fail startup with a `ConfigError`.
 * A configured database that cannot be reached or migrated fails startup
 * with a `StartupError`. Only an unset `DATABASE_URL` selects the in-memory
 * store.
 */

use std::str::FromStr;

use sqlx::migrate::MigrateError;
use sqlx::PgPool;
use thiserror::Error;

use crate::shared::ConfigError;

/// Failures that abort server startup after the configuration was read
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to connect to the database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("failed to run database migrations: {0}")]
    Migrate(#[from] MigrateError),
}

/// Secret used when `POETICA_DEV=1` and no `JWT_SECRET` is set
pub const DEVELOPMENT_SECRET: &str = "poetica-development-secret";

/// Server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
    pub max_page_limit: u32,
    pub cors_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            jwt_secret: DEVELOPMENT_SECRET.to_string(),
            token_ttl_days: 30,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            max_page_limit: 50,
            cors_origin: None,
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = match value("JWT_SECRET") {
            Some(secret) => secret,
            None if value("POETICA_DEV").as_deref() == Some("1") => {
                tracing::warn!("JWT_SECRET not set. Using the development secret.");
                DEVELOPMENT_SECRET.to_string()
            }
            None => return Err(ConfigError::MissingValue("JWT_SECRET")),
        };

        let bcrypt_cost = parse_or("BCRYPT_COST", value("BCRYPT_COST"), defaults.bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let max_page_limit = parse_or("MAX_PAGE_LIMIT", value("MAX_PAGE_LIMIT"), defaults.max_page_limit)?;
        if max_page_limit == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_PAGE_LIMIT",
                value: "0".to_string(),
            });
        }

        let token_ttl_days = parse_or("TOKEN_TTL_DAYS", value("TOKEN_TTL_DAYS"), defaults.token_ttl_days)?;
        if token_ttl_days <= 0 {
            return Err(ConfigError::InvalidValue {
                name: "TOKEN_TTL_DAYS",
                value: token_ttl_days.to_string(),
            });
        }

        Ok(Self {
            port: parse_or("SERVER_PORT", value("SERVER_PORT"), defaults.port)?,
            database_url: value("DATABASE_URL"),
            jwt_secret,
            token_ttl_days,
            bcrypt_cost,
            max_page_limit,
            cors_origin: value("CORS_ORIGIN"),
        })
    }
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        None => Ok(default),
    }
}

/// Connect to PostgreSQL and run migrations
pub async fn load_database(database_url: &str) -> Result<PgPool, StartupError> {
    tracing::info!("Connecting to database...");

    let pool = PgPool::connect(database_url).await.inspect_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
    })?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.inspect_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
    })?;

    tracing::info!("Database ready");
    Ok(pool)
}
