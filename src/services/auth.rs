// src/services/auth.rs
// DOCUMENTATION: Password hashing and session tokens
// PURPOSE: Argon2id credential storage, JWT issue/verify, handler guards

use crate::config::Config;
use crate::errors::ApiError;
use crate::models::{Role, User};
use actix_web::HttpRequest;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: Uuid,
    /// Account role at issue time
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn role(&self) -> Role {
        Role::parse(&self.role).unwrap_or(Role::User)
    }
}

/// Hash a password with Argon2id and a fresh salt
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            log::error!("Password hashing failed: {}", e);
            ApiError::InternalError
        })
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        log::error!("Stored password hash is malformed: {}", e);
        ApiError::InternalError
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Issue a session token for an account
pub fn issue_token(config: &Config, user: &User) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        role: user.role.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(config.jwt_ttl_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        log::error!("Token signing failed: {}", e);
        ApiError::InternalError
    })
}

/// Validate a session token and return its claims
pub fn validate_token(config: &Config, token: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized)
}

/// Extract the Bearer token from the Authorization header, if present
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Resolve the request's session claims, or None for anonymous requests
pub fn maybe_authenticate(req: &HttpRequest, config: &Config) -> Option<Claims> {
    bearer_token(req).and_then(|token| validate_token(config, token).ok())
}

/// Require a valid session
/// DOCUMENTATION: 401 when the token is missing, malformed, or expired
pub fn authenticate(req: &HttpRequest, config: &Config) -> Result<Claims, ApiError> {
    let token = bearer_token(req).ok_or_else(|| {
        log::warn!("Request without bearer token to protected route");
        ApiError::Unauthorized
    })?;

    validate_token(config, token)
}

/// Require a valid session carrying at least the given role
/// DOCUMENTATION: 401 without a session, 403 with an insufficient one
pub fn require_role(req: &HttpRequest, config: &Config, required: Role) -> Result<Claims, ApiError> {
    let claims = authenticate(req, config)?;

    if !claims.role().satisfies(required) {
        log::warn!(
            "Role {} rejected for route requiring {}",
            claims.role,
            required.as_str()
        );
        return Err(ApiError::Forbidden);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_config() -> Config {
        let mut config = Config::from_env();
        config.jwt_secret = "test-secret".to_string();
        config.jwt_ttl_hours = 1;
        config
    }

    fn test_user(role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "captain@example.com".to_string(),
            password_hash: String::new(),
            name: Some("Captain".to_string()),
            role: role.to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_token_roundtrip_carries_identity() {
        let config = test_config();
        let user = test_user("ADMIN");

        let token = issue_token(&config, &user).unwrap();
        let claims = validate_token(&config, &token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role(), Role::Admin);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let config = test_config();
        let user = test_user("USER");
        let token = issue_token(&config, &user).unwrap();

        let mut other = test_config();
        other.jwt_secret = "different-secret".to_string();

        assert!(validate_token(&other, &token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = test_config();
        config.jwt_ttl_hours = -2;
        let user = test_user("USER");

        let token = issue_token(&config, &user).unwrap();
        assert!(validate_token(&config, &token).is_err());
    }

    #[test]
    fn test_unknown_role_falls_back_to_user() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: "GUIDE".to_string(),
            iat: 0,
            exp: 0,
        };
        assert_eq!(claims.role(), Role::User);
    }
}
