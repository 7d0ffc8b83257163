// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! Error types for retro-notion

use thiserror::Error;

/// Errors that can occur while talking to the Notion API
#[derive(Debug, Error)]
pub enum NotionError {
    /// Transport-level failure from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Notion API error ({status} {code}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Notion error code, e.g. `validation_error`
        code: String,
        /// Error message from the response body
        message: String,
    },

    /// Response body could not be decoded
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The integration token cannot be used as a header value
    #[error("Invalid token: {reason}")]
    InvalidToken {
        /// Why the token was rejected
        reason: String,
    },
}

impl NotionError {
    /// HTTP status of an API error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
