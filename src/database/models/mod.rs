pub mod job;
pub mod user;
pub mod validate;

pub use job::{Job, JobFields, JobStatus};
pub use user::{NewUser, User};
pub use validate::ValidationErrors;
