/*!
 * Article fetching through a Markdown reader service.
 *
 * The article URL is appended verbatim to the reader prefix
 * (`https://r.jina.ai/` by default), which answers with the page as Markdown.
 * Failures are returned as-is; there is no retry.
 */

use log::{debug, error};
use reqwest::{Client, StatusCode};

use crate::app_config::FetchConfig;
use crate::errors::FetchError;
use crate::providers::http_client;

/// Client for the Markdown reader service
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    client: Client,
    reader_base: String,
}

impl ContentFetcher {
    /// Create a fetcher from configuration
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            client: http_client(config.timeout_secs),
            reader_base: config.reader_base.clone(),
        }
    }

    /// URL actually requested for an article
    pub fn reader_url(&self, url: &str) -> String {
        format!("{}{}", self.reader_base, url)
    }

    /// Fetch an article as Markdown
    pub async fn fetch_markdown(&self, url: &str) -> Result<String, FetchError> {
        let reader_url = self.reader_url(url);
        debug!("Fetching {}", reader_url);

        let response = self.client.get(&reader_url)
            .send()
            .await
            .map_err(|e| {
                error!("Reader request failed for {}: {}", url, e);
                FetchError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("Reader returned {} for {}", status, url);
            return Err(FetchError::Status { status_code: status.as_u16() });
        }

        let markdown = response.text().await
            .map_err(|e| FetchError::Body(e.to_string()))?;
        debug!("Fetched {} bytes of Markdown", markdown.len());
        Ok(markdown)
    }
}
