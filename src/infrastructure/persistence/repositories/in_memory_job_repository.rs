use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{Job, JobId, JobOutcome};

/// Map-backed store with the same pending-guard semantics as the Postgres
/// repository. Used by tests and local experiments.
#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: RwLock<HashMap<Uuid, Job>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        jobs.insert(job.id.as_uuid(), job.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(self.jobs.read().await.get(&id.as_uuid()).cloned())
    }

    async fn finalize(&self, id: JobId, outcome: &JobOutcome) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let Some(job) = jobs.get_mut(&id.as_uuid()) else {
            return Ok(());
        };
        if job.status.is_terminal() {
            return Ok(());
        }

        job.status = outcome.status();
        job.summary = outcome.summary().map(str::to_string);
        job.error_message = outcome.error_message().map(str::to_string);
        job.updated_at = Utc::now();
        Ok(())
    }
}
