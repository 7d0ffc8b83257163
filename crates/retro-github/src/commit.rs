//! GitHub commit types

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Line statistics for a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommitStats {
    /// Lines added
    pub additions: u64,
    /// Lines deleted
    pub deletions: u64,
}

impl CommitStats {
    /// Create stats from additions and deletions
    #[must_use]
    pub fn new(additions: u64, deletions: u64) -> Self {
        Self {
            additions,
            deletions,
        }
    }

    /// Total line delta (additions + deletions)
    #[must_use]
    pub fn total(&self) -> u64 {
        self.additions + self.deletions
    }
}

/// A commit fetched from a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Full commit message
    pub message: String,
    /// GitHub login of the author, when GitHub could map the commit to an account
    pub author_login: Option<String>,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Web URL of the commit
    pub html_url: String,
    /// Line statistics, when they were requested and could be fetched
    pub stats: Option<CommitStats>,
}

impl Commit {
    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Check whether the commit was authored by `login` (GitHub logins are
    /// case-insensitive)
    #[must_use]
    pub fn is_authored_by(&self, login: &str) -> bool {
        self.author_login
            .as_deref()
            .is_some_and(|l| l.eq_ignore_ascii_case(login))
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Commit object as returned by `GET /repos/{owner}/{repo}/commits[/{sha}]`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CommitResponse {
    pub sha: String,
    #[serde(default)]
    pub html_url: String,
    pub commit: GitCommitResponse,
    pub author: Option<AccountResponse>,
    pub stats: Option<StatsResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GitCommitResponse {
    pub message: String,
    pub author: Option<SignatureResponse>,
    pub committer: Option<SignatureResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SignatureResponse {
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AccountResponse {
    pub login: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct StatsResponse {
    pub additions: u64,
    pub deletions: u64,
}

impl From<StatsResponse> for CommitStats {
    fn from(s: StatsResponse) -> Self {
        CommitStats::new(s.additions, s.deletions)
    }
}

impl CommitResponse {
    /// Convert into a [`Commit`]; returns `None` when GitHub sent no date at all
    pub(crate) fn into_commit(self) -> Option<Commit> {
        // The API filters `since`/`until` on the committer date
        let timestamp = self
            .commit
            .committer
            .as_ref()
            .and_then(|c| c.date)
            .or_else(|| self.commit.author.as_ref().and_then(|a| a.date))?;

        Some(Commit {
            sha: self.sha,
            message: self.commit.message,
            author_login: self.author.map(|a| a.login),
            timestamp,
            html_url: self.html_url,
            stats: self.stats.map(CommitStats::from),
        })
    }
}
