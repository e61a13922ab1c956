use chrono::{DateTime, Utc};

use super::{JobId, JobStatus};

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub url: String,
    pub status: JobStatus,
    pub summary: Option<String>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(url: String) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            url,
            status: JobStatus::Pending,
            summary: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The single terminal write a job ever receives: either a summary or an
/// error message, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Completed { summary: String },
    Failed { error_message: String },
}

impl JobOutcome {
    pub fn status(&self) -> JobStatus {
        match self {
            JobOutcome::Completed { .. } => JobStatus::Completed,
            JobOutcome::Failed { .. } => JobStatus::Failed,
        }
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            JobOutcome::Completed { summary } => Some(summary),
            JobOutcome::Failed { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            JobOutcome::Completed { .. } => None,
            JobOutcome::Failed { error_message } => Some(error_message),
        }
    }
}
