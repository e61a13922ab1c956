use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use pagebrief::application::ports::{
    FetchError, Fetcher, JobRepository, RepositoryError, SummarizeError, Summarizer,
};
use pagebrief::application::services::{
    JobService, SubmitError, SummarizeMessage, SummarizeWorker, WorkerConfig,
};
use pagebrief::domain::{Job, JobId, JobOutcome, JobStatus};
use pagebrief::infrastructure::persistence::InMemoryJobRepository;

struct HangingFetcher;

#[async_trait::async_trait]
impl Fetcher for HangingFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        std::future::pending::<()>().await;
        unreachable!()
    }
}

struct HangingSummarizer;

#[async_trait::async_trait]
impl Summarizer for HangingSummarizer {
    async fn summarize(&self, _text: &str) -> Result<String, SummarizeError> {
        std::future::pending::<()>().await;
        unreachable!()
    }
}

/// Delegates to an in-memory store while counting create calls.
struct RecordingRepository {
    inner: InMemoryJobRepository,
    creates: AtomicUsize,
}

impl RecordingRepository {
    fn new() -> Self {
        Self {
            inner: InMemoryJobRepository::new(),
            creates: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl JobRepository for RecordingRepository {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(job).await
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        self.inner.get_by_id(id).await
    }

    async fn finalize(&self, id: JobId, outcome: &JobOutcome) -> Result<(), RepositoryError> {
        self.inner.finalize(id, outcome).await
    }
}

struct UnavailableRepository;

#[async_trait::async_trait]
impl JobRepository for UnavailableRepository {
    async fn create(&self, _job: &Job) -> Result<(), RepositoryError> {
        Err(RepositoryError::QueryFailed("store down".to_string()))
    }

    async fn get_by_id(&self, _id: JobId) -> Result<Option<Job>, RepositoryError> {
        Err(RepositoryError::QueryFailed("store down".to_string()))
    }

    async fn finalize(&self, _id: JobId, _outcome: &JobOutcome) -> Result<(), RepositoryError> {
        Err(RepositoryError::QueryFailed("store down".to_string()))
    }
}

fn slow_pipeline_service(
    repository: Arc<dyn JobRepository>,
) -> (JobService, tokio::task::JoinHandle<()>) {
    let (sender, receiver) = mpsc::channel(16);
    let worker = SummarizeWorker::new(
        receiver,
        Arc::new(HangingFetcher),
        Arc::new(HangingSummarizer),
        Arc::clone(&repository),
        WorkerConfig {
            fetch_timeout: Duration::from_secs(3600),
            summarize_timeout: Duration::from_secs(3600),
            ..WorkerConfig::default()
        },
    );
    let handle = tokio::spawn(worker.run());
    (JobService::new(repository, sender), handle)
}

#[tokio::test]
async fn given_empty_url_when_submit_then_invalid_input_and_no_record() {
    let repository = Arc::new(RecordingRepository::new());
    let (service, _worker) = slow_pipeline_service(Arc::clone(&repository) as Arc<dyn JobRepository>);

    let result = service.submit("").await;
    assert!(matches!(result, Err(SubmitError::InvalidUrl)));

    let result = service.submit("   ").await;
    assert!(matches!(result, Err(SubmitError::InvalidUrl)));

    assert_eq!(repository.creates.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_valid_url_when_submit_then_job_is_pending_with_no_outcome_fields() {
    let repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
    let (service, _worker) = slow_pipeline_service(Arc::clone(&repository));

    let job = service.submit("https://example.com").await.unwrap();
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.url, "https://example.com");
    assert!(job.summary.is_none());
    assert!(job.error_message.is_none());
    assert_eq!(job.created_at, job.updated_at);

    let stored = service.get_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Pending);
    assert!(stored.summary.is_none());
    assert!(stored.error_message.is_none());
}

#[tokio::test]
async fn given_hanging_pipeline_when_submit_then_caller_is_not_blocked() {
    let repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
    let (service, _worker) = slow_pipeline_service(repository);

    let result = tokio::time::timeout(
        Duration::from_millis(250),
        service.submit("https://example.com"),
    )
    .await;

    assert!(result.expect("submit blocked on the pipeline").is_ok());
}

#[tokio::test]
async fn given_store_failure_when_submit_then_error_and_nothing_scheduled() {
    let (sender, mut receiver) = mpsc::channel::<SummarizeMessage>(16);
    let service = JobService::new(Arc::new(UnavailableRepository), sender);

    let result = service.submit("https://example.com").await;
    assert!(matches!(result, Err(SubmitError::Repository(_))));

    assert!(matches!(
        receiver.try_recv(),
        Err(mpsc::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn given_unknown_id_when_get_by_id_then_none() {
    let repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
    let (service, _worker) = slow_pipeline_service(repository);

    let found = service.get_by_id(JobId::new()).await.unwrap();
    assert!(found.is_none());
}
