//! Error types for retro-openai

use thiserror::Error;

/// Errors that can occur while calling the chat completion API
#[derive(Debug, Error)]
pub enum OpenAiError {
    /// Transport-level failure from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("OpenAI API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// Response body could not be decoded
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The response contained no usable message
    #[error("Empty completion: {reason}")]
    EmptyCompletion {
        /// Why no text could be extracted
        reason: String,
    },

    /// The API key cannot be used as a header value
    #[error("Invalid API key: {reason}")]
    InvalidApiKey {
        /// Why the key was rejected
        reason: String,
    },
}
