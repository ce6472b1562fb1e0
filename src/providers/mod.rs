/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported LLM providers:
 * - OpenAI: OpenAI chat completions API (also used for LM Studio)
 * - Anthropic: Anthropic messages API
 */

use async_trait::async_trait;
use log::{error, warn};
use reqwest::{Client, StatusCode};
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Extract text from the provider response
    ///
    /// # Arguments
    /// * `response` - The response from the provider
    ///
    /// # Returns
    /// * `String` - The extracted text
    fn extract_text(response: &Self::Response) -> String;
}

/// Build an HTTP client with a whole-request timeout
///
/// Falls back to reqwest's defaults, without the timeout, if the builder fails.
pub(crate) fn http_client(timeout_secs: u64) -> Client {
    match Client::builder().timeout(Duration::from_secs(timeout_secs)).build() {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to build HTTP client with {}s timeout, using defaults: {}", timeout_secs, e);
            Client::new()
        }
    }
}

/// Map a transport failure to a provider error
pub(crate) fn request_error(provider: &str, err: reqwest::Error) -> ProviderError {
    if err.is_connect() || err.is_timeout() {
        ProviderError::ConnectionError(format!("{}: {}", provider, err))
    } else {
        ProviderError::RequestFailed(format!("{}: {}", provider, err))
    }
}

/// Turn a non-success response into a provider error
pub(crate) async fn status_error(provider: &str, response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let error_text = response.text().await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    error!("{} API error ({}): {}", provider, status, error_text);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(error_text),
        _ => ProviderError::ApiError {
            status_code: status.as_u16(),
            message: error_text,
        },
    }
}

pub mod anthropic;
pub mod openai;
