use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::application::ports::{FetchError, Fetcher};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const MAX_REDIRECTS: usize = 5;

/// Fetches a page over plain HTTP and extracts its visible text. No
/// JavaScript rendering; static HTML only.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(request_timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchError::new(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::new(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(format!("HTTP {} for {}", status, url)));
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::new(e.to_string()))?;

        let text = extract_visible_text(&html);
        if text.is_empty() {
            return Err(FetchError::new("no textual content"));
        }

        Ok(text)
    }
}

/// Body text with script/style subtrees removed and whitespace collapsed.
fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let noise = Selector::parse("script, style, noscript, template").unwrap();
    let mut stripped = html.to_string();
    for element in document.select(&noise) {
        stripped = stripped.replace(&element.html(), "");
    }

    let document = Html::parse_document(&stripped);
    let body = Selector::parse("body").unwrap();
    let text: Vec<&str> = match document.select(&body).next() {
        Some(body) => body.text().collect(),
        None => document.root_element().text().collect(),
    };

    text.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}
