// handlers/public/auth/register.rs - POST /api/v1/auth/register handler
use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::RegisterRequest;
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AuthSession;

/// POST /api/v1/auth/register - Create an account and receive a token
///
/// Input: `{ "name", "email", "password" }`
///
/// Output (201): `{ "user": { "name" }, "token" }`
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<AuthSession> {
    let Json(body) = payload?;

    let session = state
        .auth
        .register(body.name.as_deref(), body.email.as_deref(), body.password.as_deref())
        .await?;

    Ok(ApiResponse::created(session))
}
