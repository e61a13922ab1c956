use crate::application::ports::{SummarizeError, Summarizer};

pub struct MockSummarizer;

#[async_trait::async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, _text: &str) -> Result<String, SummarizeError> {
        Ok("Mock summary".to_string())
    }
}
