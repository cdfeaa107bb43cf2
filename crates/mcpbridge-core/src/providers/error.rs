//! Provider error types

use thiserror::Error;

/// Errors from a model completion request
///
/// None of these are retried; they abort the current query.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// API request failed
    #[error("{provider} API error: {message}")]
    ApiError { provider: String, message: String },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request did not finish in time
    #[error("{provider} request timed out after {seconds}s")]
    Timeout { provider: String, seconds: u64 },

    /// Invalid response from provider
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse { provider: String, message: String },

    /// Provider id or settings not usable
    #[error("Provider configuration error: {0}")]
    Configuration(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Create an API error
    pub fn api_error(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
