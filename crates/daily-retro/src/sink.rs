// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! Report persistence: local Markdown files and Notion pages

use std::path::{Path, PathBuf};

use retro_notion::{Block, CreatePageRequest, NotionClient, NotionError};
use tracing::{error, info};

use crate::report::Report;

/// Intro paragraph placed above the code block layout
pub const INTRO_TEXT: &str = "GitHub 활동 회고록이 자동으로 생성되었습니다.";

/// Errors persisting a report
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing the local file failed
    #[error("Failed to write {path}: {source}")]
    Io {
        /// File or directory being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Creating the Notion page failed
    #[error("Failed to create Notion page: {0}")]
    Notion(#[from] NotionError),
}

// ============================================================================
// Local file
// ============================================================================

/// Writes reports to `<dir>/<YYYY-MM-DD>_github_reflection.md`
#[derive(Debug, Clone)]
pub struct LocalSink {
    dir: PathBuf,
}

impl LocalSink {
    /// Create a sink writing into `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `report` verbatim, creating the directory and replacing any
    /// existing file for the same day
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Io` if the directory or file cannot be written.
    pub fn write(&self, report: &Report) -> Result<PathBuf, SinkError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| SinkError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = report.path_in(&self.dir);
        std::fs::write(&path, report.text()).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Report saved");
        Ok(path)
    }
}

// ============================================================================
// Notion
// ============================================================================

/// How a report is laid out on a Notion page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLayout {
    /// Title `{date} GitHub 활동 회고`, a date column, an intro paragraph and
    /// the report in a markdown code block
    CodeBlock,
    /// Title `회고록 - {date}` and the report as one paragraph
    Paragraph,
}

impl PageLayout {
    /// Default title column for the layout
    #[must_use]
    pub fn title_property(&self) -> &'static str {
        match self {
            Self::CodeBlock => "제목",
            Self::Paragraph => "Name",
        }
    }

    /// Default date column for the layout, if it sets one
    #[must_use]
    pub fn date_property(&self) -> Option<&'static str> {
        match self {
            Self::CodeBlock => Some("날짜"),
            Self::Paragraph => None,
        }
    }

    /// Page title for a report dated `stamp`
    #[must_use]
    pub fn title(&self, stamp: &str) -> String {
        match self {
            Self::CodeBlock => format!("{stamp} GitHub 활동 회고"),
            Self::Paragraph => format!("회고록 - {stamp}"),
        }
    }
}

/// Creates one Notion page per report in a database
#[derive(Debug, Clone)]
pub struct NotionSink {
    client: NotionClient,
    database_id: String,
    title_property: Option<String>,
    date_property: Option<String>,
}

impl NotionSink {
    /// Create a sink for `database_id`
    #[must_use]
    pub fn new(client: NotionClient, database_id: impl Into<String>) -> Self {
        Self {
            client,
            database_id: database_id.into(),
            title_property: None,
            date_property: None,
        }
    }

    /// Use `name` as the title column instead of the layout default
    #[must_use]
    pub fn with_title_property(mut self, name: impl Into<String>) -> Self {
        self.title_property = Some(name.into());
        self
    }

    /// Use `name` as the date column instead of the layout default
    #[must_use]
    pub fn with_date_property(mut self, name: impl Into<String>) -> Self {
        self.date_property = Some(name.into());
        self
    }

    /// Build the page request for `report`
    #[must_use]
    pub fn page_request(&self, report: &Report, layout: PageLayout) -> CreatePageRequest {
        let stamp = report.date_stamp();
        let title_property = self
            .title_property
            .as_deref()
            .unwrap_or(layout.title_property());

        let mut request = CreatePageRequest::in_database(&self.database_id)
            .title(title_property, &layout.title(&stamp));

        if let Some(date_property) = self.date_property.as_deref().or(layout.date_property()) {
            request = request.date(date_property, report.date());
        }

        match layout {
            PageLayout::CodeBlock => request
                .child(Block::paragraph(INTRO_TEXT))
                .children(Block::code_blocks("markdown", report.text())),
            PageLayout::Paragraph => request.children(Block::paragraphs(report.text())),
        }
    }

    /// Create the page and return its URL
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Notion` if the page cannot be created. The error
    /// is logged before it is returned.
    pub async fn publish(&self, report: &Report, layout: PageLayout) -> Result<String, SinkError> {
        let request = self.page_request(report, layout);
        match self.client.create_page(&request).await {
            Ok(page) => {
                info!(url = %page.url, "Report saved to Notion");
                Ok(page.url)
            }
            Err(e) => {
                error!(error = %e, database = %self.database_id, "Failed to save report to Notion");
                Err(e.into())
            }
        }
    }
}
