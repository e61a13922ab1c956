mod job_service;
mod summarize_worker;

pub use job_service::{JobService, SubmitError};
pub use summarize_worker::{SummarizeMessage, SummarizeWorker, WorkerConfig};
