/*!
 * Error types for the artran application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when fetching article Markdown
#[derive(Error, Debug)]
pub enum FetchError {
    /// The reader service answered with something other than 200
    #[error("Reader returned non-200 status: {status_code}")]
    Status {
        /// HTTP status code
        status_code: u16,
    },

    /// The request never got a response
    #[error("Request to reader failed: {0}")]
    Transport(String),

    /// The response body could not be read as text
    #[error("Failed to read reader response body: {0}")]
    Body(String),
}

/// Errors raised while validating configuration, before any network call
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A provider that needs credentials has none configured
    #[error("Missing API key for {provider} provider (set it in the config file or environment)")]
    MissingApiKey {
        /// Provider display name
        provider: String,
    },

    /// The configured target language is not a known ISO code
    #[error("Invalid target language: {0}")]
    InvalidLanguage(String),
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration was incomplete for the chosen provider
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Placeholders did not survive translation (strict mode only)
    #[error("Translation lost {} code block placeholder(s): {}", missing.len(), missing.join(", "))]
    PlaceholdersLost {
        /// Placeholders absent from the translated text
        missing: Vec<String>,
    },
}
