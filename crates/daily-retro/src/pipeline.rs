// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! The fetch, summarize and persist pipeline
//!
//! One [`Pipeline`] run covers one day: commits are fetched for the window,
//! handed to the configured [`Summarizer`], and the resulting report is
//! written to whichever sinks are configured. Session-level fetch failures,
//! summarizer failures and sink failures end the run; everything else is
//! collected in [`Diagnostics`].

use std::path::PathBuf;

use retro_github::{CommitFetcher, CommitWindow, GithubClient, GithubError};
use retro_notion::NotionClient;
use retro_openai::OpenAiClient;
use tracing::{info, warn};

use crate::config::{Settings, SummarizerSettings};
use crate::diagnostics::Diagnostics;
use crate::report::Report;
use crate::sink::{LocalSink, NotionSink, SinkError};
use crate::summarize::{LlmSummarizer, SummarizeError, Summarizer, TemplateSummarizer};

/// Errors that end a run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Fetching commits failed for the whole session
    #[error("GitHub error: {0}")]
    Github(#[from] GithubError),

    /// The summarizer failed
    #[error("Summarizer error: {0}")]
    Summarize(#[from] SummarizeError),

    /// Persisting the report failed
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Result of a finished run
#[derive(Debug)]
pub struct RunOutcome {
    /// The report, unless the summarizer had nothing to write
    pub report: Option<Report>,
    /// Where the local file was written
    pub local_path: Option<PathBuf>,
    /// URL of the created Notion page
    pub page_url: Option<String>,
    /// Non-fatal failures raised during the run
    pub diagnostics: Diagnostics,
}

/// One day's fetch, summarize and persist sequence
pub struct Pipeline {
    fetcher: CommitFetcher,
    summarizer: Box<dyn Summarizer>,
    window: CommitWindow,
    local: Option<LocalSink>,
    notion: Option<NotionSink>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("fetcher", &self.fetcher)
            .field("summarizer", &self.summarizer.name())
            .field("window", &self.window)
            .field("local", &self.local)
            .field("notion", &self.notion)
            .finish()
    }
}

impl Pipeline {
    /// Create a pipeline without sinks
    #[must_use]
    pub fn new(fetcher: CommitFetcher, summarizer: Box<dyn Summarizer>, window: CommitWindow) -> Self {
        Self {
            fetcher,
            summarizer,
            window,
            local: None,
            notion: None,
        }
    }

    /// Write reports to a local directory
    #[must_use]
    pub fn with_local_sink(mut self, sink: LocalSink) -> Self {
        self.local = Some(sink);
        self
    }

    /// Upload reports to Notion
    #[must_use]
    pub fn with_notion_sink(mut self, sink: NotionSink) -> Self {
        self.notion = Some(sink);
        self
    }

    /// Build the pipeline described by `settings`
    ///
    /// # Errors
    ///
    /// Returns an error if one of the HTTP clients cannot be created, e.g.
    /// because a token contains characters not allowed in a header.
    pub fn from_settings(settings: &Settings) -> Result<Self, PipelineError> {
        let github = GithubClient::with_base_url(&settings.github.token, &settings.github.api_url)?;
        let fetcher = CommitFetcher::new(github, &settings.github.username);

        let summarizer: Box<dyn Summarizer> = match &settings.summarizer {
            SummarizerSettings::Template => Box::new(TemplateSummarizer),
            SummarizerSettings::Llm {
                api_key,
                api_url,
                model,
                temperature,
            } => {
                let client =
                    OpenAiClient::with_base_url(api_key, api_url).map_err(SummarizeError::from)?;
                Box::new(LlmSummarizer::new(client, model, *temperature))
            }
        };

        let mut pipeline = Self::new(fetcher, summarizer, settings.window());

        if let Some(dir) = &settings.output_dir {
            pipeline = pipeline.with_local_sink(LocalSink::new(dir));
        }

        if let Some(notion) = &settings.notion {
            let client =
                NotionClient::with_base_url(&notion.token, &notion.api_url).map_err(SinkError::from)?;
            let mut sink = NotionSink::new(client, &notion.database_id);
            if let Some(name) = &notion.title_property {
                sink = sink.with_title_property(name);
            }
            if let Some(name) = &notion.date_property {
                sink = sink.with_date_property(name);
            }
            pipeline = pipeline.with_notion_sink(sink);
        }

        Ok(pipeline)
    }

    /// Run the pipeline once
    ///
    /// # Errors
    ///
    /// Returns `PipelineError` when the fetch fails for the whole session,
    /// the summarizer fails, or a sink cannot persist the report.
    pub async fn run(&self) -> Result<RunOutcome, PipelineError> {
        info!(
            date = %self.window.date,
            summarizer = self.summarizer.name(),
            local = self.local.is_some(),
            notion = self.notion.is_some(),
            "Starting daily retrospective"
        );

        let fetched = self
            .fetcher
            .fetch(&self.window, &self.summarizer.fetch_options())
            .await?;

        let mut diagnostics = Diagnostics::new();
        diagnostics.record_fetch(&fetched);

        let report = self
            .summarizer
            .summarize(&fetched.groups, self.window.date, &mut diagnostics)
            .await?;

        let Some(report) = report else {
            info!("Nothing to persist");
            diagnostics.log();
            return Ok(RunOutcome {
                report: None,
                local_path: None,
                page_url: None,
                diagnostics,
            });
        };

        let local_path = match &self.local {
            Some(sink) => Some(sink.write(&report)?),
            None => None,
        };

        let page_url = match &self.notion {
            Some(sink) => Some(sink.publish(&report, self.summarizer.page_layout()).await?),
            None => None,
        };

        diagnostics.log();
        if !diagnostics.is_empty() {
            warn!(count = diagnostics.len(), "Run finished with skipped items");
        }

        Ok(RunOutcome {
            report: Some(report),
            local_path,
            page_url,
            diagnostics,
        })
    }
}
