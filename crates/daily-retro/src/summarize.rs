//! Summarizer strategies
//!
//! A [`Summarizer`] turns the grouped commits into a [`Report`]. It also
//! decides what the fetcher has to collect and how the report is laid out
//! on a Notion page, so the pipeline itself has no per-strategy branches.

use async_trait::async_trait;
use chrono::NaiveDate;
use retro_github::{CommitGroups, FetchOptions, PERSONAL_LABEL};
use retro_openai::{ChatMessage, ChatRequest, OpenAiClient, OpenAiError};
use tracing::{debug, info};

use crate::diagnostics::{Diagnostics, Stage};
use crate::report::{Report, render_report};
use crate::sink::PageLayout;

/// Logged when the model summarizer finds nothing to write about
pub const NO_COMMITS_TODAY: &str = "오늘 작성한 커밋이 없습니다.";

/// Errors producing a summary
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    /// The chat completion call failed
    #[error("Completion failed: {0}")]
    Completion(#[from] OpenAiError),
}

/// Turns grouped commits into a report
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// What the fetcher must collect for this summarizer
    fn fetch_options(&self) -> FetchOptions;

    /// How the report is laid out on a Notion page
    fn page_layout(&self) -> PageLayout;

    /// Build the report, or `None` when there is nothing to persist
    ///
    /// Non-fatal problems are recorded in `diagnostics`.
    async fn summarize(
        &self,
        groups: &CommitGroups,
        date: NaiveDate,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<Report>, SummarizeError>;
}

// ============================================================================
// Template
// ============================================================================

/// Renders the fixed Markdown report
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateSummarizer;

#[async_trait]
impl Summarizer for TemplateSummarizer {
    fn name(&self) -> &'static str {
        "template"
    }

    fn fetch_options(&self) -> FetchOptions {
        FetchOptions::default().with_stats()
    }

    fn page_layout(&self) -> PageLayout {
        PageLayout::CodeBlock
    }

    async fn summarize(
        &self,
        groups: &CommitGroups,
        date: NaiveDate,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<Report>, SummarizeError> {
        let outcome = render_report(groups, date);
        for skipped in &outcome.skipped {
            diagnostics.record(
                Stage::Report,
                format!("{}/{}", skipped.org, skipped.repo),
                skipped.error.to_string(),
            );
        }
        Ok(Some(outcome.report))
    }
}

// ============================================================================
// Chat model
// ============================================================================

/// Asks a chat model to write the retrospective
#[derive(Debug, Clone)]
pub struct LlmSummarizer {
    client: OpenAiClient,
    model: String,
    temperature: f32,
}

impl LlmSummarizer {
    /// Create a summarizer using `model` at `temperature`
    #[must_use]
    pub fn new(client: OpenAiClient, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
        }
    }
}

/// Build the prompt listing every commit message by repository
///
/// Repositories outside [`PERSONAL_LABEL`] are qualified with their
/// organization. Empty repositories are left out.
#[must_use]
pub fn build_prompt(groups: &CommitGroups) -> String {
    let mut formatted = String::new();
    for org in groups {
        for repo in org.non_empty_repos() {
            if org.label == PERSONAL_LABEL {
                formatted.push_str(&format!("📦 {}\n", repo.name));
            } else {
                formatted.push_str(&format!("📦 {}/{}\n", org.label, repo.name));
            }
            for commit in &repo.commits {
                formatted.push_str(&format!("- {}\n", commit.message));
            }
            formatted.push('\n');
        }
    }

    format!(
        "다음은 내가 오늘 작성한 GitHub 커밋 메시지들이야. 레포지토리별로 정리되어 있어:\n\n{formatted}\n\
         이 내용을 바탕으로 각 레포에서 한 일, 느낀 점, 개선점 등을 포함한 회고록을 써줘. \
         레포별로 항목을 나눠서 정리해줘."
    )
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    fn name(&self) -> &'static str {
        "llm"
    }

    fn fetch_options(&self) -> FetchOptions {
        FetchOptions::default()
    }

    fn page_layout(&self) -> PageLayout {
        PageLayout::Paragraph
    }

    async fn summarize(
        &self,
        groups: &CommitGroups,
        date: NaiveDate,
        _diagnostics: &mut Diagnostics,
    ) -> Result<Option<Report>, SummarizeError> {
        if groups.is_empty() {
            info!("{}", NO_COMMITS_TODAY);
            return Ok(None);
        }

        let prompt = build_prompt(groups);
        debug!(model = %self.model, chars = prompt.chars().count(), "Requesting retrospective");

        let request = ChatRequest::new(&self.model, vec![ChatMessage::user(prompt)])
            .with_temperature(self.temperature);
        let text = self.client.complete(&request).await?;

        Ok(Some(Report::new(date, text)))
    }
}
