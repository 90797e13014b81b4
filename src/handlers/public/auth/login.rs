// handlers/public/auth/login.rs - POST /api/v1/auth/login handler
use axum::{extract::rejection::JsonRejection, extract::State, Json};

use super::LoginRequest;
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::AuthSession;

/// POST /api/v1/auth/login - Exchange credentials for a token
///
/// Input: `{ "email", "password" }`
///
/// Output (200): `{ "user": { "name" }, "token" }`. Missing fields give 400;
/// an unknown email and a wrong password both give the same 401.
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<AuthSession> {
    let Json(body) = payload?;

    let session = state
        .auth
        .login(body.email.as_deref(), body.password.as_deref())
        .await?;

    Ok(ApiResponse::success(session))
}
