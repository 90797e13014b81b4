pub mod memory;
pub mod migrations;
pub mod models;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use models::{Job, JobFields, User};

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate value for unique field: {field}")]
    Duplicate { field: String },

    #[error("Store call exceeded {0:?}")]
    Timeout(Duration),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence for users and their jobs.
///
/// Every job operation takes the owner's id; implementations must include it
/// in the match so records owned by someone else behave as absent.
#[async_trait]
pub trait Store: Send + Sync {
    /// Persist a new user. Fails with `Duplicate { field: "email" }` when the
    /// email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Jobs owned by `owner`, oldest first.
    async fn list_jobs(&self, owner: Uuid) -> Result<Vec<Job>, StoreError>;

    async fn find_job(&self, id: Uuid, owner: Uuid) -> Result<Option<Job>, StoreError>;

    async fn insert_job(&self, job: &Job) -> Result<(), StoreError>;

    /// Returns the updated job, or `None` when no job matches both ids.
    async fn update_job(
        &self,
        id: Uuid,
        owner: Uuid,
        fields: &JobFields,
    ) -> Result<Option<Job>, StoreError>;

    /// Returns whether a job matching both ids was removed.
    async fn delete_job(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Bounds a store call so a hung backend fails the request instead of stalling it.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(limit)),
    }
}
