use async_trait::async_trait;

use crate::domain::{Job, JobId, JobOutcome};

use super::RepositoryError;

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    /// Apply the terminal outcome as a single atomic write. Only a pending
    /// job is touched; applying an outcome to an already-terminal job is a
    /// no-op, so a duplicate trigger cannot overwrite a result.
    async fn finalize(&self, id: JobId, outcome: &JobOutcome) -> Result<(), RepositoryError>;
}
