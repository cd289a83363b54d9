/**
 * Session Tokens
 *
 * Sessions are stateless HS256 JWTs. A token carries the user id (`sub`)
 * and username; the middleware still checks that the user exists on every
 * request.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::server::config::ServerConfig;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Create a token for a user, valid for `config.token_ttl_days`
pub fn create_token(
    config: &ServerConfig,
    user_id: Uuid,
    username: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: (now + Duration::days(config.token_ttl_days)).timestamp(),
        iat: now.timestamp(),
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Verify signature and expiry, returning the claims
pub fn verify_token(config: &ServerConfig, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ServerConfig {
        ServerConfig {
            jwt_secret: "test-secret".to_string(),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_token(&config(), user_id, "rumi").unwrap();
        let claims = verify_token(&config(), &token).unwrap();
        assert_eq!(claims.user_id(), Some(user_id));
        assert_eq!(claims.username, "rumi");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_lifetime_follows_config() {
        let config = ServerConfig {
            token_ttl_days: 2,
            ..config()
        };
        let token = create_token(&config, Uuid::new_v4(), "rumi").unwrap();
        let claims = verify_token(&config, &token).unwrap();
        assert_eq!(claims.exp - claims.iat, 2 * 24 * 60 * 60);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token(&config(), Uuid::new_v4(), "rumi").unwrap();
        let other = ServerConfig {
            jwt_secret: "another-secret".to_string(),
            ..ServerConfig::default()
        };
        assert!(verify_token(&other, &token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(verify_token(&config(), "invalid.token.here").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = config();
        let past = Utc::now() - Duration::days(2);
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "rumi".to_string(),
            exp: (past + Duration::days(1)).timestamp(),
            iat: past.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&config, &token).is_err());
    }
}
