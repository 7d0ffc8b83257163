//! Non-fatal failures collected during a run
//!
//! Anything that only affects one unit of work (a repository, a commit's
//! stats, a report subsection) is recorded here instead of aborting the run.
//! The collected [`Diagnostics`] travel with the run outcome and are logged
//! once at the end.

use std::fmt;

use retro_github::FetchReport;
use tracing::warn;

/// Pipeline stage a diagnostic was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Listing repositories or commits
    Fetch,
    /// Fetching per-commit line statistics
    Stats,
    /// Building the report
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetch => "fetch",
            Self::Stats => "stats",
            Self::Report => "report",
        };
        f.write_str(name)
    }
}

/// A single recorded failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where it happened
    pub stage: Stage,
    /// What it happened to, e.g. `acme/api`
    pub subject: String,
    /// What went wrong
    pub reason: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.subject, self.reason)
    }
}

/// Diagnostics collected over one run, in the order they were raised
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure
    pub fn record(&mut self, stage: Stage, subject: impl Into<String>, reason: impl Into<String>) {
        self.entries.push(Diagnostic {
            stage,
            subject: subject.into(),
            reason: reason.into(),
        });
    }

    /// Record the repository and stats failures of a fetch
    pub fn record_fetch(&mut self, report: &FetchReport) {
        for failure in &report.failures {
            self.record(Stage::Fetch, failure.subject(), failure.reason.clone());
        }
        for subject in &report.missing_stats {
            self.record(Stage::Stats, subject.clone(), "line statistics unavailable");
        }
    }

    /// Recorded diagnostics
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Diagnostics raised in `stage`
    pub fn in_stage(&self, stage: Stage) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.stage == stage)
    }

    /// Number of diagnostics
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Log every diagnostic at warn level
    pub fn log(&self) {
        for d in &self.entries {
            warn!(stage = %d.stage, subject = %d.subject, reason = %d.reason, "Skipped during run");
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
