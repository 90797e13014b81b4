use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::database::models::{Job, JobFields};
use crate::database::{with_timeout, Store};
use crate::error::ApiError;

/// Raw job fields as received from a client
#[derive(Debug, Clone, Default)]
pub struct JobInput<'a> {
    pub company: Option<&'a str>,
    pub position: Option<&'a str>,
    pub status: Option<&'a str>,
}

impl<'a> JobInput<'a> {
    fn into_fields(self) -> Result<JobFields, ApiError> {
        let present = |v: Option<&'a str>| v.filter(|s| !s.is_empty());
        match (present(self.company), present(self.position)) {
            (Some(company), Some(position)) => Ok(JobFields::parse(company, position, self.status)?),
            _ => Err(ApiError::bad_request("Please provide company and position")),
        }
    }
}

/// Job CRUD where every query is scoped to the caller
#[derive(Clone)]
pub struct JobService {
    store: Arc<dyn Store>,
    timeout: Duration,
}

impl JobService {
    pub fn new(store: Arc<dyn Store>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Job>, ApiError> {
        Ok(with_timeout(self.timeout, self.store.list_jobs(owner)).await?)
    }

    pub async fn get(&self, owner: Uuid, id: &str) -> Result<Job, ApiError> {
        let job_id = parse_id(id)?;
        with_timeout(self.timeout, self.store.find_job(job_id, owner))
            .await?
            .ok_or_else(|| ApiError::job_not_found(job_id))
    }

    /// Owner always comes from the caller, never from the input.
    pub async fn create(&self, owner: Uuid, input: JobInput<'_>) -> Result<Job, ApiError> {
        let job = input.into_fields()?.into_job(owner);
        with_timeout(self.timeout, self.store.insert_job(&job)).await?;
        debug!("Created job {} for {}", job.id, owner);
        Ok(job)
    }

    pub async fn update(&self, owner: Uuid, id: &str, input: JobInput<'_>) -> Result<Job, ApiError> {
        let fields = input.into_fields()?;
        let job_id = parse_id(id)?;
        with_timeout(self.timeout, self.store.update_job(job_id, owner, &fields))
            .await?
            .ok_or_else(|| ApiError::job_not_found(job_id))
    }

    pub async fn delete(&self, owner: Uuid, id: &str) -> Result<(), ApiError> {
        let job_id = parse_id(id)?;
        let removed = with_timeout(self.timeout, self.store.delete_job(job_id, owner)).await?;
        if !removed {
            return Err(ApiError::job_not_found(job_id));
        }
        debug!("Deleted job {} for {}", job_id, owner);
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::malformed_id(id))
}
