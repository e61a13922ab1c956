mod fetcher;
mod job_repository;
mod repository_error;
mod summarizer;

pub use fetcher::{FetchError, Fetcher};
pub use job_repository::JobRepository;
pub use repository_error::RepositoryError;
pub use summarizer::{SummarizeError, Summarizer};
