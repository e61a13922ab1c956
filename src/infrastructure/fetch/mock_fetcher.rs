use crate::application::ports::{FetchError, Fetcher};

pub struct MockFetcher;

#[async_trait::async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Ok("Mock page text".to_string())
    }
}
