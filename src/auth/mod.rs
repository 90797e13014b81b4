pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

pub use password::{hash_password, verify_password, PasswordError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

/// Any token that fails signature, format or expiry checks.
///
/// Deliberately carries no detail so callers cannot tell the cases apart.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid token")]
pub struct InvalidToken;

#[derive(Debug, Error)]
pub enum TokenGenerationError {
    #[error("JWT generation error: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),

    #[error("token lifetime of {0:?} overflows the expiry timestamp")]
    LifetimeOverflow(std::time::Duration),
}

/// Signs and verifies session tokens with a server-held HMAC secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: std::time::Duration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, lifetime: std::time::Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.jwt_secret, security.jwt_lifetime())
    }

    pub fn issue(&self, user_id: Uuid, name: &str) -> Result<String, TokenGenerationError> {
        self.issue_at(user_id, name, Utc::now())
    }

    pub fn issue_at(
        &self,
        user_id: Uuid,
        name: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenGenerationError> {
        let expires_at = Duration::from_std(self.lifetime)
            .ok()
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or(TokenGenerationError::LifetimeOverflow(self.lifetime))?;

        let claims = Claims {
            user_id,
            name: name.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, InvalidToken> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", std::time::Duration::from_secs(3600))
    }

    #[test]
    fn verify_returns_issued_claims() {
        let issuer = issuer();
        let user_id = Uuid::new_v4();

        let token = issuer.issue(user_id, "Ada").unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.name, "Ada");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_invalid() {
        let issuer = issuer();
        let issued_at = Utc::now() - Duration::hours(2);

        let token = issuer.issue_at(Uuid::new_v4(), "Ada", issued_at).unwrap();

        assert_eq!(issuer.verify(&token), Err(InvalidToken));
    }

    #[test]
    fn oversized_lifetime_fails_instead_of_panicking() {
        let lifetime = std::time::Duration::from_secs(11_574_074_074 * 24 * 3600);
        let issuer = TokenIssuer::new("test-secret", lifetime);

        let result = issuer.issue(Uuid::new_v4(), "Ada");

        assert!(matches!(result, Err(TokenGenerationError::LifetimeOverflow(l)) if l == lifetime));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let other = TokenIssuer::new("other-secret", std::time::Duration::from_secs(3600));
        let token = other.issue(Uuid::new_v4(), "Ada").unwrap();

        assert_eq!(issuer().verify(&token), Err(InvalidToken));
    }

    #[test]
    fn tampered_and_garbage_tokens_are_invalid() {
        let issuer = issuer();
        let token = issuer.issue(Uuid::new_v4(), "Ada").unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_payload = {
            let other = issuer.issue(Uuid::new_v4(), "Mallory").unwrap();
            other.split('.').nth(1).unwrap().to_string()
        };
        parts[1] = &forged_payload;
        let tampered = parts.join(".");

        assert_eq!(issuer.verify(&tampered), Err(InvalidToken));
        assert_eq!(issuer.verify("not-a-token"), Err(InvalidToken));
        assert_eq!(issuer.verify(""), Err(InvalidToken));
    }
}
