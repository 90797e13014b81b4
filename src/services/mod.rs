pub mod auth_service;
pub mod job_service;

pub use auth_service::{AuthService, AuthSession, UserSummary};
pub use job_service::{JobInput, JobService};
