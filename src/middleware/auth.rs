use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{Claims, TokenIssuer};
use crate::error::{ApiError, AUTH_INVALID};

/// Authenticated caller resolved from the bearer token.
///
/// Handlers receive it as `Extension<AuthUser>`; it is the only source of the
/// owner id used in job queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub name: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            name: claims.name,
        }
    }
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    State(tokens): State<Arc<TokenIssuer>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = authenticate(&tokens, request.headers())?;
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Resolves the caller from the `Authorization` header.
///
/// Missing header, wrong scheme and a bad token all produce the same error.
pub fn authenticate(tokens: &TokenIssuer, headers: &HeaderMap) -> Result<AuthUser, ApiError> {
    let token = extract_bearer(headers).ok_or_else(|| {
        tracing::debug!("Rejected request without bearer token");
        ApiError::unauthorized(AUTH_INVALID)
    })?;

    let claims = tokens.verify(token).map_err(|e| {
        tracing::warn!("Rejected request with invalid token");
        ApiError::from(e)
    })?;

    Ok(AuthUser::from(claims))
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
