// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! Collecting a user's commits for one day
//!
//! The fetcher walks the user's own repositories first (grouped under
//! [`PERSONAL_LABEL`]) and then every repository of every organization the
//! user belongs to. Each repository is fetched on its own: a failure there is
//! logged, recorded as a [`RepoFailure`], and the walk moves on. Only
//! failures that affect the whole session (listing the user's repositories or
//! organizations, rejected credentials) are returned as errors.

use tracing::{debug, info, warn};

use crate::client::{CommitQuery, GithubClient, Repository};
use crate::commit::Commit;
use crate::error::GithubError;
use crate::group::{CommitGroups, PERSONAL_LABEL};
use crate::window::CommitWindow;

/// Options for a fetch run
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Fetch per-commit line statistics (one extra request per commit)
    pub include_stats: bool,
}

impl FetchOptions {
    /// Create options with line statistics enabled
    #[must_use]
    pub fn with_stats(mut self) -> Self {
        self.include_stats = true;
        self
    }
}

/// A repository (or organization) that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFailure {
    /// Organization label the repository belongs to
    pub org: String,
    /// Repository name, `None` when listing the organization itself failed
    pub repo: Option<String>,
    /// What went wrong
    pub reason: String,
}

impl RepoFailure {
    /// `org/repo`, or just `org` when the organization listing failed
    #[must_use]
    pub fn subject(&self) -> String {
        match self.repo {
            Some(ref repo) => format!("{}/{}", self.org, repo),
            None => self.org.clone(),
        }
    }
}

/// Result of a fetch run
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Commits grouped by organization and repository
    pub groups: CommitGroups,
    /// Repositories skipped because of an error
    pub failures: Vec<RepoFailure>,
    /// Commits whose stats could not be fetched (`org/repo@sha`)
    pub missing_stats: Vec<String>,
}

/// Collects commits authored by one user inside a [`CommitWindow`]
#[derive(Debug, Clone)]
pub struct CommitFetcher {
    client: GithubClient,
    username: String,
}

impl CommitFetcher {
    /// Create a fetcher for commits authored by `username`
    #[must_use]
    pub fn new(client: GithubClient, username: impl Into<String>) -> Self {
        Self {
            client,
            username: username.into(),
        }
    }

    /// The username commits are filtered by
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Fetch and group every commit the user authored inside `window`
    ///
    /// # Errors
    ///
    /// Returns `GithubError` only for session-level failures: the token is
    /// rejected, or the user's repositories or organizations cannot be
    /// listed. Per-repository failures are reported in
    /// [`FetchReport::failures`].
    pub async fn fetch(
        &self,
        window: &CommitWindow,
        options: &FetchOptions,
    ) -> Result<FetchReport, GithubError> {
        info!(
            since = %window.since,
            until = %window.until,
            user = %self.username,
            "Searching commits"
        );

        let account = self.client.authenticated_user().await?;
        debug!(login = %account.login, "Authenticated");

        let query = CommitQuery::default()
            .author(&self.username)
            .since(window.since)
            .until(window.until);

        let mut report = FetchReport::default();

        let personal = self.client.list_owned_repos().await?;
        for repo in &personal {
            self.fetch_repo(PERSONAL_LABEL, repo, &query, window, options, &mut report)
                .await;
        }

        let orgs = self.client.list_orgs().await?;
        for org in &orgs {
            let repos = match self.client.list_org_repos(&org.login).await {
                Ok(repos) => repos,
                Err(e) => {
                    warn!(org = %org.login, error = %e, "Failed to list organization repositories");
                    report.failures.push(RepoFailure {
                        org: org.login.clone(),
                        repo: None,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            for repo in &repos {
                self.fetch_repo(&org.login, repo, &query, window, options, &mut report)
                    .await;
            }
        }

        info!(
            repositories = personal.len(),
            organizations = orgs.len(),
            commits = report.groups.total_commits(),
            failures = report.failures.len(),
            "Commit search complete"
        );

        Ok(report)
    }

    async fn fetch_repo(
        &self,
        org: &str,
        repo: &Repository,
        query: &CommitQuery,
        window: &CommitWindow,
        options: &FetchOptions,
        report: &mut FetchReport,
    ) {
        let commits = match self
            .client
            .list_commits(&repo.owner.login, &repo.name, query)
            .await
        {
            Ok(commits) => commits,
            Err(e) => {
                warn!(org = %org, repo = %repo.name, error = %e, "Failed to fetch repository commits");
                report.failures.push(RepoFailure {
                    org: org.to_string(),
                    repo: Some(repo.name.clone()),
                    reason: e.to_string(),
                });
                return;
            }
        };

        let entry = report.groups.ensure_repo(org, &repo.name);
        for commit in commits {
            if !self.accepts(&commit, window) {
                debug!(repo = %repo.name, sha = %commit.short_sha(), "Skipping commit outside filter");
                continue;
            }
            entry.commits.push(commit);
        }

        if options.include_stats {
            for commit in entry.commits.iter_mut().filter(|c| c.stats.is_none()) {
                match self
                    .client
                    .commit_stats(&repo.owner.login, &repo.name, &commit.sha)
                    .await
                {
                    Ok(stats) => commit.stats = Some(stats),
                    Err(e) => {
                        warn!(repo = %repo.name, sha = %commit.short_sha(), error = %e, "Failed to fetch commit stats");
                        report
                            .missing_stats
                            .push(format!("{}/{}@{}", org, repo.name, commit.short_sha()));
                    }
                }
            }
        }

        if !entry.is_empty() {
            debug!(org = %org, repo = %repo.name, commits = entry.commit_count(), "Collected commits");
        }
    }

    fn accepts(&self, commit: &Commit, window: &CommitWindow) -> bool {
        commit.is_authored_by(&self.username) && window.contains(&commit.timestamp)
    }
}
