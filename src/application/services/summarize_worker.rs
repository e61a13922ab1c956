use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::time::timeout;
use tracing::Instrument;

use crate::application::ports::{FetchError, Fetcher, JobRepository, SummarizeError, Summarizer};
use crate::domain::{JobId, JobOutcome};

pub struct SummarizeMessage {
    pub job_id: JobId,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub max_concurrent_jobs: usize,
    pub fetch_timeout: Duration,
    pub summarize_timeout: Duration,
    pub finalize_retries: u32,
    pub finalize_retry_delay: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 4,
            fetch_timeout: Duration::from_secs(30),
            summarize_timeout: Duration::from_secs(60),
            finalize_retries: 3,
            finalize_retry_delay: Duration::from_millis(500),
        }
    }
}

/// Consumes submitted jobs and runs the fetch -> summarize -> finalize
/// pipeline for each one. At most `max_concurrent_jobs` pipelines run at a
/// time; admission follows arrival order. `run` returns only after the queue
/// is closed and every in-flight job has written its terminal state.
pub struct SummarizeWorker {
    receiver: mpsc::Receiver<SummarizeMessage>,
    pipeline: Arc<JobPipeline>,
    max_concurrent_jobs: usize,
}

impl SummarizeWorker {
    pub fn new(
        receiver: mpsc::Receiver<SummarizeMessage>,
        fetcher: Arc<dyn Fetcher>,
        summarizer: Arc<dyn Summarizer>,
        job_repository: Arc<dyn JobRepository>,
        config: WorkerConfig,
    ) -> Self {
        let max_concurrent_jobs = config.max_concurrent_jobs.max(1);
        Self {
            receiver,
            max_concurrent_jobs,
            pipeline: Arc::new(JobPipeline {
                fetcher,
                summarizer,
                job_repository,
                config,
            }),
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            max_concurrent_jobs = self.max_concurrent_jobs,
            "Summarize worker started"
        );
        let slots = Arc::new(Semaphore::new(self.max_concurrent_jobs));

        while let Some(msg) = self.receiver.recv().await {
            let Ok(permit) = Arc::clone(&slots).acquire_owned().await else {
                break;
            };

            let span = tracing::info_span!(
                "summarize_job",
                job_id = %msg.job_id.as_uuid(),
                url = %msg.url,
            );
            let pipeline = Arc::clone(&self.pipeline);
            tokio::spawn(
                async move {
                    let _permit = permit;
                    pipeline.process_job(msg).await;
                }
                .instrument(span),
            );
        }

        // Queue closed; wait until every slot is free again so callers can
        // rely on all accepted jobs having reached a terminal write.
        let _ = slots.acquire_many(self.max_concurrent_jobs as u32).await;
        tracing::info!("Summarize worker stopped: queue closed");
    }
}

struct JobPipeline {
    fetcher: Arc<dyn Fetcher>,
    summarizer: Arc<dyn Summarizer>,
    job_repository: Arc<dyn JobRepository>,
    config: WorkerConfig,
}

impl JobPipeline {
    async fn process_job(&self, msg: SummarizeMessage) {
        let outcome = match self.run_stages(&msg.url).await {
            Ok(summary) => {
                tracing::info!("Summarization completed");
                JobOutcome::Completed { summary }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Summarization failed");
                JobOutcome::Failed {
                    error_message: e.to_string(),
                }
            }
        };

        self.finalize_with_retry(msg.job_id, &outcome).await;
    }

    async fn run_stages(&self, url: &str) -> Result<String, StageError> {
        let fetch_timeout = self.config.fetch_timeout;
        let text = match timeout(fetch_timeout, self.fetcher.fetch(url)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(
                    FetchError::new(format!("timed out after {}ms", fetch_timeout.as_millis()))
                        .into(),
                );
            }
        };
        tracing::debug!(chars = text.len(), "Content fetched");

        let summarize_timeout = self.config.summarize_timeout;
        let summary = match timeout(summarize_timeout, self.summarizer.summarize(&text)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(SummarizeError::new(format!(
                    "timed out after {}ms",
                    summarize_timeout.as_millis()
                ))
                .into());
            }
        };

        Ok(summary)
    }

    async fn finalize_with_retry(&self, job_id: JobId, outcome: &JobOutcome) {
        let mut attempts_left = self.config.finalize_retries;
        let mut delay = self.config.finalize_retry_delay;

        loop {
            match self.job_repository.finalize(job_id, outcome).await {
                Ok(()) => {
                    tracing::debug!(status = %outcome.status(), "Job finalized");
                    return;
                }
                Err(e) if attempts_left > 0 => {
                    attempts_left -= 1;
                    tracing::warn!(
                        error = %e,
                        attempts_left,
                        delay_ms = delay.as_millis() as u64,
                        "Terminal write failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        status = %outcome.status(),
                        "Giving up on terminal write, job stays pending"
                    );
                    return;
                }
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum StageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
}
