use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use super::{JobEnvelope, JobList, JobRequest};
use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/v1/jobs - All jobs owned by the caller, oldest first
pub async fn jobs_get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<JobList> {
    let jobs = state.jobs.list(user.user_id).await?;
    let count = jobs.len();
    Ok(ApiResponse::success(JobList { jobs, count }))
}

/// POST /api/v1/jobs - Create a job owned by the caller
pub async fn jobs_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<JobRequest>, JsonRejection>,
) -> ApiResult<JobEnvelope> {
    let Json(body) = payload?;
    let job = state.jobs.create(user.user_id, body.as_input()).await?;
    Ok(ApiResponse::created(JobEnvelope { job }))
}
