// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! Error types for retro-github

use thiserror::Error;

/// Errors that can occur while talking to GitHub
#[derive(Debug, Error)]
pub enum GithubError {
    /// Transport-level failure from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by GitHub
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// Response body could not be decoded
    #[error("Failed to decode GitHub response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The access token cannot be used as a header value
    #[error("Invalid access token: {reason}")]
    InvalidToken {
        /// Why the token was rejected
        reason: String,
    },
}

impl GithubError {
    /// HTTP status carried by an API error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the failure means the credentials were rejected
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
