// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! Markdown report generation
//!
//! The report is a pure function of the grouped commits and the reference
//! date. Section order follows the insertion order of [`CommitGroups`], so
//! the same fetch always renders the same text.
//!
//! Layout of a non-empty report:
//!
//! ```text
//! # 2026년 01월 16일 GitHub 활동 회고
//!
//! ## Personal (2개 커밋)
//!
//! ### repoA (2개 커밋)
//!
//! #### 주요 활동
//!
//! - fix bug
//! - add feature
//!
//! #### 가장 큰 변경사항
//! - add feature
//! - 추가: 20줄, 삭제: 10줄
//!
//! ## 총 요약
//! ...
//! ```

use std::path::Path;

use chrono::NaiveDate;
use retro_github::{Commit, CommitGroups};
use tracing::{debug, warn};

/// Line used instead of the body when no commits were found
pub const NO_COMMITS_LINE: &str = "이 날은 GitHub에 커밋한 내용이 없습니다.\n";

/// Suffix of local report file names
pub const FILE_SUFFIX: &str = "_github_reflection.md";

const REFLECTION_TEMPLATE: &str = "## 자가 회고\n\n- 오늘의 성과: \n- 어려웠던 점: \n- 내일의 계획: \n";

// ============================================================================
// Types
// ============================================================================

/// Errors computing a repository's largest change
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// A commit was fetched without line statistics
    #[error("commit {sha} has no line statistics")]
    MissingStats {
        /// SHA of the commit lacking stats
        sha: String,
    },

    /// The commit list was empty
    #[error("no commits to compare")]
    NoCommits,
}

/// A finished report for one day
///
/// Reports are immutable once built; sinks only read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    date: NaiveDate,
    text: String,
}

impl Report {
    /// Wrap already rendered text
    #[must_use]
    pub fn new(date: NaiveDate, text: impl Into<String>) -> Self {
        Self {
            date,
            text: text.into(),
        }
    }

    /// The day the report covers
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The report body
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// `YYYY-MM-DD` form of the date
    #[must_use]
    pub fn date_stamp(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// File name used when the report is written locally
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}{}", self.date_stamp(), FILE_SUFFIX)
    }

    /// Full path of the report inside `dir`
    #[must_use]
    pub fn path_in(&self, dir: &Path) -> std::path::PathBuf {
        dir.join(self.file_name())
    }
}

/// A repository whose largest-change subsection was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSection {
    /// Organization label
    pub org: String,
    /// Repository name
    pub repo: String,
    /// Why the subsection was skipped
    pub error: ReportError,
}

/// A rendered report plus the subsections that could not be computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    /// The rendered report
    pub report: Report,
    /// Repositories rendered without a largest-change subsection
    pub skipped: Vec<SkippedSection>,
}

// ============================================================================
// Generation
// ============================================================================

/// Pick the commit with the largest `additions + deletions`
///
/// Ties go to the commit that comes first in `commits`.
///
/// # Errors
///
/// Returns `ReportError::MissingStats` for the first commit without stats,
/// or `ReportError::NoCommits` for an empty slice.
pub fn largest_commit(commits: &[Commit]) -> Result<&Commit, ReportError> {
    let mut best: Option<(&Commit, u64)> = None;

    for commit in commits {
        let total = commit
            .stats
            .map(|s| s.total())
            .ok_or_else(|| ReportError::MissingStats {
                sha: commit.sha.clone(),
            })?;
        match best {
            Some((_, max)) if max >= total => {}
            _ => best = Some((commit, total)),
        }
    }

    best.map(|(commit, _)| commit).ok_or(ReportError::NoCommits)
}

/// Render the report for `date`
#[must_use]
pub fn generate_report(groups: &CommitGroups, date: NaiveDate) -> Report {
    render_report(groups, date).report
}

/// Render the report for `date`, keeping track of skipped subsections
///
/// Every skip is also logged at warn level.
#[must_use]
pub fn render_report(groups: &CommitGroups, date: NaiveDate) -> ReportOutcome {
    let mut text = format!("# {} GitHub 활동 회고\n\n", date.format("%Y년 %m월 %d일"));
    let mut skipped = Vec::new();

    if groups.total_commits() == 0 {
        text.push_str(NO_COMMITS_LINE);
        return ReportOutcome {
            report: Report::new(date, text),
            skipped,
        };
    }

    let mut total = 0;
    for org in groups {
        let org_count = org.commit_count();
        if org_count == 0 {
            continue;
        }
        total += org_count;
        text.push_str(&format!("## {} ({}개 커밋)\n\n", org.label, org_count));

        for repo in org.non_empty_repos() {
            text.push_str(&format!("### {} ({}개 커밋)\n\n", repo.name, repo.commit_count()));

            text.push_str("#### 주요 활동\n\n");
            for commit in &repo.commits {
                text.push_str(&format!("- {}\n", commit.subject()));
            }

            match largest_commit(&repo.commits) {
                Ok(commit) => {
                    // largest_commit only succeeds when every commit has stats
                    let stats = commit.stats.unwrap_or_default();
                    text.push_str("\n#### 가장 큰 변경사항\n");
                    text.push_str(&format!("- {}\n", commit.subject()));
                    text.push_str(&format!(
                        "- 추가: {}줄, 삭제: {}줄\n",
                        stats.additions, stats.deletions
                    ));
                }
                Err(error) => {
                    warn!(org = %org.label, repo = %repo.name, error = %error, "Skipping largest change");
                    skipped.push(SkippedSection {
                        org: org.label.clone(),
                        repo: repo.name.clone(),
                        error,
                    });
                }
            }

            text.push('\n');
        }
    }

    text.push_str("## 총 요약\n\n");
    text.push_str(&format!("이 날 총 {total}개의 커밋을 수행했습니다.\n\n"));
    text.push_str(REFLECTION_TEMPLATE);

    debug!(total, skipped = skipped.len(), chars = text.chars().count(), "Report rendered");

    ReportOutcome {
        report: Report::new(date, text),
        skipped,
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use retro_github::CommitStats;

    fn commit_strategy() -> impl Strategy<Value = Commit> {
        ("[a-z ]{1,20}", 0u64..50, 0u64..50).prop_map(|(message, a, d)| Commit {
            sha: "0".repeat(40),
            message,
            author_login: None,
            timestamp: Utc.with_ymd_and_hms(2026, 1, 16, 0, 0, 0).unwrap(),
            html_url: String::new(),
            stats: Some(CommitStats::new(a, d)),
        })
    }

    /// org index -> repo index -> commits
    fn groups_strategy() -> impl Strategy<Value = CommitGroups> {
        prop::collection::vec(
            prop::collection::vec(prop::collection::vec(commit_strategy(), 0..4), 0..4),
            0..4,
        )
        .prop_map(|orgs| {
            let mut groups = CommitGroups::new();
            for (o, repos) in orgs.into_iter().enumerate() {
                for (r, commits) in repos.into_iter().enumerate() {
                    let org = format!("org{o}");
                    let repo = format!("repo{r}");
                    groups.ensure_repo(&org, &repo);
                    for commit in commits {
                        groups.push(&org, &repo, commit);
                    }
                }
            }
            groups
        })
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()
    }

    proptest! {
        /// The summary total always equals the sum of the repository counts
        #[test]
        fn prop_total_matches_sum(groups in groups_strategy()) {
            let text = generate_report(&groups, date()).text().to_string();
            let total = groups.total_commits();
            if total == 0 {
                prop_assert!(text.ends_with(NO_COMMITS_LINE));
            } else {
                let summary = format!("이 날 총 {total}개의 커밋을 수행했습니다.");
                prop_assert!(text.contains(&summary));
            }
        }

        /// Empty repositories and organizations never get a heading
        #[test]
        fn prop_empty_sections_are_omitted(groups in groups_strategy()) {
            let text = generate_report(&groups, date()).text().to_string();
            for org in &groups {
                let heading = format!("## {} (", org.label);
                prop_assert_eq!(text.contains(&heading), org.commit_count() > 0);
                for repo in &org.repos {
                    if repo.is_empty() {
                        // repo names repeat across orgs, so only check the count-qualified form
                        let heading = format!("### {} (0개 커밋)", repo.name);
                        prop_assert!(!text.contains(&heading));
                    }
                }
            }
        }

        /// The largest commit has the maximal total and no earlier commit ties it
        #[test]
        fn prop_largest_is_first_maximum(commits in prop::collection::vec(commit_strategy(), 1..10)) {
            let largest = largest_commit(&commits).unwrap();
            let idx = commits.iter().position(|c| std::ptr::eq(c, largest)).unwrap();
            let total = largest.stats.unwrap().total();
            for (i, c) in commits.iter().enumerate() {
                let other = c.stats.unwrap().total();
                prop_assert!(other <= total);
                if i < idx {
                    prop_assert!(other < total);
                }
            }
        }
    }
}
