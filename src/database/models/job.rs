use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::validate::ValidationErrors;

pub const COMPANY_MAX_LEN: usize = 50;
pub const POSITION_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Interview,
    Declined,
    #[default]
    Pending,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Interview => "interview",
            JobStatus::Declined => "declined",
            JobStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interview" => Ok(JobStatus::Interview),
            "declined" => Ok(JobStatus::Declined),
            "pending" => Ok(JobStatus::Pending),
            other => Err(format!("`{}` is not a valid status", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub status: JobStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated field values for a create or an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFields {
    pub company: String,
    pub position: String,
    pub status: Option<JobStatus>,
}

impl JobFields {
    /// `company` and `position` must already be known to be present; this
    /// applies the length and enum rules.
    pub fn parse(company: &str, position: &str, status: Option<&str>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let company = company.trim();
        let position = position.trim();
        errors.required("company", Some(company), "Please provide company name");
        errors.max_len("company", company, COMPANY_MAX_LEN);
        errors.required("position", Some(position), "Please provide position");
        errors.max_len("position", position, POSITION_MAX_LEN);

        let status = match status.map(str::parse::<JobStatus>) {
            Some(Ok(status)) => Some(status),
            Some(Err(msg)) => {
                errors.add("status", msg);
                None
            }
            None => None,
        };

        errors.into_result()?;

        Ok(Self {
            company: company.to_string(),
            position: position.to_string(),
            status,
        })
    }

    /// New job owned by `owner`, defaulting status to pending.
    pub fn into_job(self, owner: Uuid) -> Job {
        let now = Utc::now();
        Job {
            id: Uuid::new_v4(),
            company: self.company,
            position: self.position,
            status: self.status.unwrap_or_default(),
            created_by: owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the changed fields to an existing job.
    pub fn apply(&self, job: &mut Job) {
        job.company = self.company.clone();
        job.position = self.position.clone();
        if let Some(status) = self.status {
            job.status = status;
        }
        job.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_pending() {
        let owner = Uuid::new_v4();
        let job = JobFields::parse("Acme", "Engineer", None).unwrap().into_job(owner);

        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.created_by, owner);
        assert_eq!(job.created_at, job.updated_at);
    }

    #[test]
    fn rejects_unknown_status() {
        let err = JobFields::parse("Acme", "Engineer", Some("hired")).unwrap_err();
        assert!(err.has_field("status"));
    }

    #[test]
    fn enforces_length_limits() {
        let company = "c".repeat(COMPANY_MAX_LEN + 1);
        let position = "p".repeat(POSITION_MAX_LEN + 1);
        let err = JobFields::parse(&company, &position, None).unwrap_err();
        assert!(err.has_field("company"));
        assert!(err.has_field("position"));

        let company = "c".repeat(COMPANY_MAX_LEN);
        let position = "p".repeat(POSITION_MAX_LEN);
        assert!(JobFields::parse(&company, &position, None).is_ok());
    }

    #[test]
    fn apply_keeps_status_unless_given() {
        let mut job = JobFields::parse("Acme", "Engineer", Some("interview"))
            .unwrap()
            .into_job(Uuid::new_v4());

        JobFields::parse("Acme Corp", "Lead", None).unwrap().apply(&mut job);
        assert_eq!(job.company, "Acme Corp");
        assert_eq!(job.status, JobStatus::Interview);

        JobFields::parse("Acme Corp", "Lead", Some("declined")).unwrap().apply(&mut job);
        assert_eq!(job.status, JobStatus::Declined);
    }

    #[test]
    fn serializes_with_wire_names() {
        let job = JobFields::parse("Acme", "Engineer", None).unwrap().into_job(Uuid::new_v4());
        let value = serde_json::to_value(&job).unwrap();

        assert!(value.get("_id").is_some());
        assert!(value.get("createdBy").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["status"], "pending");
    }
}
