use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Job, JobFields, User};
use super::{Store, StoreError};

/// Process-local store with the same uniqueness and ownership rules as the
/// Postgres store. Data is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    jobs: RwLock<Vec<Job>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate {
                field: "email".to_string(),
            });
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_jobs(&self, owner: Uuid) -> Result<Vec<Job>, StoreError> {
        let jobs = self.jobs.read().await;
        let mut owned: Vec<Job> = jobs.iter().filter(|j| j.created_by == owner).cloned().collect();
        // Stable sort keeps insertion order for equal timestamps
        owned.sort_by_key(|j| j.created_at);
        Ok(owned)
    }

    async fn find_job(&self, id: Uuid, owner: Uuid) -> Result<Option<Job>, StoreError> {
        let jobs = self.jobs.read().await;
        Ok(jobs
            .iter()
            .find(|j| j.id == id && j.created_by == owner)
            .cloned())
    }

    async fn insert_job(&self, job: &Job) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        if jobs.iter().any(|j| j.id == job.id) {
            return Err(StoreError::Duplicate {
                field: "_id".to_string(),
            });
        }
        jobs.push(job.clone());
        Ok(())
    }

    async fn update_job(
        &self,
        id: Uuid,
        owner: Uuid,
        fields: &JobFields,
    ) -> Result<Option<Job>, StoreError> {
        let mut jobs = self.jobs.write().await;
        Ok(jobs
            .iter_mut()
            .find(|j| j.id == id && j.created_by == owner)
            .map(|job| {
                fields.apply(job);
                job.clone()
            }))
    }

    async fn delete_job(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|j| !(j.id == id && j.created_by == owner));
        Ok(jobs.len() != before)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
