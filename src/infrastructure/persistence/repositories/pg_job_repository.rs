use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{Job, JobId, JobOutcome, JobStatus};

pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    url: String,
    status: String,
    summary: Option<String>,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = RepositoryError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<JobStatus>()
            .map_err(RepositoryError::QueryFailed)?;

        Ok(Job {
            id: JobId::from_uuid(row.id),
            url: row.url,
            status,
            summary: row.summary,
            error_message: row.error_message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id.as_uuid()))]
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, url, status, summary, error_message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(job.id.as_uuid())
        .bind(&job.url)
        .bind(job.status.as_str())
        .bind(&job.summary)
        .bind(&job.error_message)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %id.as_uuid()))]
    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, url, status, summary, error_message, created_at, updated_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(Job::try_from).transpose()
    }

    #[instrument(skip(self, outcome), fields(job_id = %id.as_uuid(), status = %outcome.status()))]
    async fn finalize(&self, id: JobId, outcome: &JobOutcome) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET status = $1, summary = $2, error_message = $3, updated_at = $4
            WHERE id = $5 AND status = $6
            "#,
        )
        .bind(outcome.status().as_str())
        .bind(outcome.summary())
        .bind(outcome.error_message())
        .bind(Utc::now())
        .bind(id.as_uuid())
        .bind(JobStatus::Pending.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            tracing::debug!("Terminal write skipped: job unknown or already terminal");
        }

        Ok(())
    }
}
