// handlers/protected/jobs/mod.rs - Job CRUD scoped to the caller
use serde::{Deserialize, Serialize};

use crate::database::models::Job;
use crate::services::JobInput;

pub mod collection; // GET, POST /api/v1/jobs
pub mod record;     // GET, PATCH, DELETE /api/v1/jobs/:id

pub use collection::{jobs_get, jobs_post};
pub use record::{job_delete, job_get, job_patch};

/// Body for create and update. Unknown fields such as `createdBy` are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct JobRequest {
    pub company: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
}

impl JobRequest {
    pub fn as_input(&self) -> JobInput<'_> {
        JobInput {
            company: self.company.as_deref(),
            position: self.position.as_deref(),
            status: self.status.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobList {
    pub jobs: Vec<Job>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct JobEnvelope {
    pub job: Job,
}
