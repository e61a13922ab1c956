use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{Job, JobId};

use super::SummarizeMessage;

/// Front door for job submission and lookup. `submit` records the job and
/// enqueues it for the worker; it never waits on fetching or summarization.
pub struct JobService {
    job_repository: Arc<dyn JobRepository>,
    sender: mpsc::Sender<SummarizeMessage>,
}

impl JobService {
    pub fn new(job_repository: Arc<dyn JobRepository>, sender: mpsc::Sender<SummarizeMessage>) -> Self {
        Self {
            job_repository,
            sender,
        }
    }

    pub async fn submit(&self, url: &str) -> Result<Job, SubmitError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(SubmitError::InvalidUrl);
        }

        let job = Job::new(url.to_string());
        self.job_repository.create(&job).await?;

        let msg = SummarizeMessage {
            job_id: job.id,
            url: job.url.clone(),
        };
        if self.sender.send(msg).await.is_err() {
            tracing::error!(job_id = %job.id.as_uuid(), "Summarize queue closed, job not scheduled");
            return Err(SubmitError::QueueClosed);
        }

        tracing::info!(job_id = %job.id.as_uuid(), url = %job.url, "Job submitted");
        Ok(job)
    }

    pub async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        self.job_repository.get_by_id(id).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("url must not be empty")]
    InvalidUrl,
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("summarize queue closed")]
    QueueClosed,
}
