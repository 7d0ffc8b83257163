// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! retro-github: GitHub commit fetching for daily-retro
//!
//! This library crate talks to the GitHub REST API, collects the commits a
//! user authored during a day, and groups them by organization and
//! repository for consumption by the daily-retro report pipeline.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use retro_github::{CommitFetcher, CommitWindow, FetchOptions, GithubClient};
//!
//! # async fn run() -> Result<(), retro_github::GithubError> {
//! let client = GithubClient::new("ghp_token")?;
//! let fetcher = CommitFetcher::new(client, "octocat");
//! let report = fetcher
//!     .fetch(&CommitWindow::yesterday(), &FetchOptions::default().with_stats())
//!     .await?;
//!
//! for org in report.groups.iter() {
//!     println!("{} - {} commits", org.label, org.commit_count());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod commit;
pub mod error;
pub mod fetch;
pub mod group;
pub mod window;

pub use client::{CommitQuery, GithubClient, Organization, Repository};
pub use commit::{Commit, CommitStats};
pub use error::GithubError;
pub use fetch::{CommitFetcher, FetchOptions, FetchReport, RepoFailure};
pub use group::{CommitGroups, OrgCommits, PERSONAL_LABEL, RepoCommits};
pub use window::CommitWindow;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{Commit, CommitStats};
    pub use crate::error::GithubError;
    pub use crate::fetch::{CommitFetcher, FetchOptions, FetchReport};
    pub use crate::group::{CommitGroups, OrgCommits, RepoCommits};
    pub use crate::window::CommitWindow;
}
