use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password, TokenIssuer};
use crate::database::models::NewUser;
use crate::database::{with_timeout, Store};
use crate::error::{ApiError, INVALID_CREDENTIALS};

/// Public part of an account returned alongside a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub name: String,
}

/// Result of a successful register or login
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: UserSummary,
    pub token: String,
}

/// Registration and login over a user store
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    tokens: Arc<TokenIssuer>,
    timeout: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, tokens: Arc<TokenIssuer>, timeout: Duration) -> Self {
        Self { store, tokens, timeout }
    }

    pub async fn register(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<AuthSession, ApiError> {
        let new_user = NewUser::parse(name, email, password)?;

        let plaintext = new_user.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&plaintext))
            .await
            .map_err(|e| {
                tracing::error!("Password hashing task failed: {}", e);
                ApiError::internal_server_error()
            })??;

        let user = new_user.into_user(password_hash);
        with_timeout(self.timeout, self.store.insert_user(&user)).await?;

        info!("Registered user {} ({})", user.name, user.id);
        self.session_for(user.id, user.name)
    }

    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<AuthSession, ApiError> {
        let (email, password) = match (non_empty(email), non_empty(password)) {
            (Some(email), Some(password)) => (email.trim(), password),
            _ => return Err(ApiError::bad_request("Please provide email and password")),
        };

        let user = with_timeout(self.timeout, self.store.find_user_by_email(email)).await?;

        // Unknown email and wrong password must be indistinguishable
        let Some(user) = user else {
            warn!("Login rejected: unknown account");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        };

        let candidate = password.to_string();
        let stored = user.password.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&candidate, &stored))
            .await
            .map_err(|e| {
                tracing::error!("Password verification task failed: {}", e);
                ApiError::internal_server_error()
            })?;

        if !matches {
            warn!("Login rejected for user {}", user.id);
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }

        info!("User {} logged in", user.id);
        self.session_for(user.id, user.name)
    }

    fn session_for(&self, id: uuid::Uuid, name: String) -> Result<AuthSession, ApiError> {
        let token = self.tokens.issue(id, &name)?;
        Ok(AuthSession {
            user: UserSummary { name },
            token,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
