// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! retro-openai: OpenAI chat completions for daily-retro
//!
//! This library crate provides the request/response types and a small async
//! client for the OpenAI chat completion endpoint, used by daily-retro to
//! turn a day's commit messages into a written retrospective.

#![warn(missing_docs)]

//! ## Usage
//!
//! ```rust,no_run
//! use retro_openai::{ChatMessage, ChatRequest, OpenAiClient};
//!
//! # async fn run() -> Result<(), retro_openai::OpenAiError> {
//! let client = OpenAiClient::new("sk-...")?;
//! let request = ChatRequest::new("gpt-4", vec![ChatMessage::user("Summarize my day")])
//!     .with_temperature(0.7);
//! let text = client.complete(&request).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod client;
pub mod error;

pub use chat::{ChatMessage, ChatRequest, ChatResponse, Choice, MessageRole};
pub use client::OpenAiClient;
pub use error::OpenAiError;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::chat::{ChatMessage, ChatRequest, MessageRole};
    pub use crate::client::OpenAiClient;
    pub use crate::error::OpenAiError;
}
