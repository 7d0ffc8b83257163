// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! daily-retro library
//!
//! This module exports the report generation, persistence and pipeline
//! pieces of daily-retro for use in integration tests, benchmarks and the
//! binary.

#![warn(missing_docs)]

pub mod config;
pub mod diagnostics;
pub mod pipeline;
pub mod report;
pub mod sink;
pub mod summarize;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigError, Settings, SummarizerKind};
    pub use crate::diagnostics::{Diagnostic, Diagnostics, Stage};
    pub use crate::pipeline::{Pipeline, PipelineError, RunOutcome};
    pub use crate::report::{Report, ReportError, generate_report, largest_commit};
    pub use crate::sink::{LocalSink, NotionSink, PageLayout, SinkError};
    pub use crate::summarize::{LlmSummarizer, Summarizer, TemplateSummarizer};
}
