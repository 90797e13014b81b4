use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use super::{JobEnvelope, JobRequest};
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/v1/jobs/:id - One job, 404 unless the caller owns it
pub async fn job_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<JobEnvelope> {
    let job = state.jobs.get(user.user_id, &id).await?;
    Ok(ApiResponse::success(JobEnvelope { job }))
}

/// PATCH /api/v1/jobs/:id - Replace company and position (and optionally status)
pub async fn job_patch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<JobRequest>, JsonRejection>,
) -> ApiResult<JobEnvelope> {
    let Json(body) = payload?;
    let job = state.jobs.update(user.user_id, &id, body.as_input()).await?;
    Ok(ApiResponse::success(JobEnvelope { job }))
}

/// DELETE /api/v1/jobs/:id - Remove a job; empty 200 body on success
pub async fn job_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.jobs.delete(user.user_id, &id).await?;
    Ok(ApiResponse::empty())
}
