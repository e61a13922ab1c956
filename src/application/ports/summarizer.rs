use async_trait::async_trait;

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Failed to generate summary: {cause}")]
pub struct SummarizeError {
    pub cause: String,
}

impl SummarizeError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}
