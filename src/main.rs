use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use pagebrief::application::ports::JobRepository;
use pagebrief::application::services::{JobService, SummarizeWorker, WorkerConfig};
use pagebrief::infrastructure::fetch::HttpFetcher;
use pagebrief::infrastructure::llm::OpenAiSummarizer;
use pagebrief::infrastructure::observability::{init_tracing, TracingConfig};
use pagebrief::infrastructure::persistence::{connect_pool, PgJobRepository};
use pagebrief::presentation::{create_router, AppState, Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig {
        environment: environment.to_string(),
        level: settings.logging.level.clone(),
        json_format: settings.logging.enable_json,
    });

    let pool = connect_pool(&settings.database.url, settings.database.max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let job_repository: Arc<dyn JobRepository> = Arc::new(PgJobRepository::new(pool));

    let fetch_timeout = Duration::from_secs(settings.fetcher.timeout_secs);
    let fetcher = Arc::new(HttpFetcher::new(fetch_timeout)?);

    let api_key = if settings.llm.api_key.is_empty() {
        std::env::var("OPENAI_API_KEY").unwrap_or_default()
    } else {
        settings.llm.api_key.clone()
    };
    let summarizer = Arc::new(OpenAiSummarizer::new(
        api_key,
        settings.llm.chat_model.clone(),
        settings.llm.max_tokens,
        settings.llm.temperature,
        settings.llm.max_input_chars,
    ));

    let (sender, receiver) = mpsc::channel(settings.pipeline.queue_capacity);

    let worker = SummarizeWorker::new(
        receiver,
        fetcher,
        summarizer,
        Arc::clone(&job_repository),
        WorkerConfig {
            max_concurrent_jobs: settings.pipeline.max_concurrent_jobs,
            fetch_timeout,
            summarize_timeout: Duration::from_secs(settings.pipeline.summarize_timeout_secs),
            finalize_retries: settings.pipeline.finalize_retries,
            finalize_retry_delay: Duration::from_millis(settings.pipeline.finalize_retry_delay_ms),
        },
    );
    let worker_handle = tokio::spawn(worker.run());

    let state = AppState {
        job_service: Arc::new(JobService::new(job_repository, sender)),
    };
    let router = create_router(state);

    let host: IpAddr = settings.server.host.parse()?;
    let addr = SocketAddr::from((host, settings.server.port));
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Serving is done, which dropped the last queue sender; the worker
    // finishes accepted jobs and exits.
    worker_handle.await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
