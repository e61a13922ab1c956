use async_trait::async_trait;

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Failed to scrape content: {cause}")]
pub struct FetchError {
    pub cause: String,
}

impl FetchError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}
