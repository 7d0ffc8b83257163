// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! Thin async client for the GitHub REST API
//!
//! Only the handful of endpoints the commit fetcher needs are covered. List
//! endpoints follow the `Link: <...>; rel="next"` header until exhausted.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::commit::{Commit, CommitResponse, CommitStats};
use crate::error::GithubError;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size requested from list endpoints (GitHub's maximum)
const PER_PAGE: &str = "100";

const API_VERSION: &str = "2022-11-28";

const USER_AGENT: &str = concat!("daily-retro/", env!("CARGO_PKG_VERSION"));

/// A GitHub account (user or organization owner)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// Account login
    pub login: String,
}

/// An organization the authenticated user belongs to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    /// Organization login
    pub login: String,
}

/// A repository as returned by the repository list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    /// Repository name (without owner)
    pub name: String,
    /// Repository owner
    pub owner: Account,
}

/// Filters for `GET /repos/{owner}/{repo}/commits`
#[derive(Debug, Clone, Default)]
pub struct CommitQuery {
    /// Only commits by this GitHub login or email
    pub author: Option<String>,
    /// Only commits after this instant
    pub since: Option<DateTime<Utc>>,
    /// Only commits before this instant
    pub until: Option<DateTime<Utc>>,
}

impl CommitQuery {
    /// Filter by author
    #[must_use]
    pub fn author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    /// Filter commits since a date
    #[must_use]
    pub fn since(mut self, date: DateTime<Utc>) -> Self {
        self.since = Some(date);
        self
    }

    /// Filter commits until a date
    #[must_use]
    pub fn until(mut self, date: DateTime<Utc>) -> Self {
        self.until = Some(date);
        self
    }

    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("per_page", PER_PAGE.to_string())];
        if let Some(ref author) = self.author {
            pairs.push(("author", author.clone()));
        }
        if let Some(since) = self.since {
            pairs.push(("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(until) = self.until {
            pairs.push(("until", until.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        pairs
    }
}

/// Error body GitHub sends with non-success responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Authenticated GitHub REST client
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    /// Create a client for the public GitHub API
    ///
    /// # Errors
    ///
    /// Returns `GithubError::InvalidToken` if the token contains characters
    /// that cannot be sent in a header, or `GithubError::Http` if the HTTP
    /// client cannot be built.
    pub fn new(token: &str) -> Result<Self, GithubError> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Create a client for a custom API endpoint (GitHub Enterprise, tests)
    ///
    /// # Errors
    ///
    /// Same as [`GithubClient::new`].
    pub fn with_base_url(token: &str, base_url: impl Into<String>) -> Result<Self, GithubError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            GithubError::InvalidToken {
                reason: e.to_string(),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The API base URL this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /user`: the account the token belongs to
    ///
    /// # Errors
    ///
    /// Returns `GithubError::Api` with status 401 when the token is rejected.
    pub async fn authenticated_user(&self) -> Result<Account, GithubError> {
        self.get_json(&format!("{}/user", self.base_url), &[]).await
    }

    /// `GET /user/repos?affiliation=owner`: repositories the user owns
    ///
    /// # Errors
    ///
    /// Returns `GithubError` if any page cannot be fetched or decoded.
    pub async fn list_owned_repos(&self) -> Result<Vec<Repository>, GithubError> {
        self.get_paginated(
            &format!("{}/user/repos", self.base_url),
            &[
                ("affiliation", "owner".to_string()),
                ("per_page", PER_PAGE.to_string()),
            ],
        )
        .await
    }

    /// `GET /user/orgs`: organizations the user is a member of
    ///
    /// # Errors
    ///
    /// Returns `GithubError` if any page cannot be fetched or decoded.
    pub async fn list_orgs(&self) -> Result<Vec<Organization>, GithubError> {
        self.get_paginated(
            &format!("{}/user/orgs", self.base_url),
            &[("per_page", PER_PAGE.to_string())],
        )
        .await
    }

    /// `GET /orgs/{org}/repos`: repositories of an organization
    ///
    /// # Errors
    ///
    /// Returns `GithubError` if any page cannot be fetched or decoded.
    pub async fn list_org_repos(&self, org: &str) -> Result<Vec<Repository>, GithubError> {
        self.get_paginated(
            &format!("{}/orgs/{org}/repos", self.base_url),
            &[("per_page", PER_PAGE.to_string())],
        )
        .await
    }

    /// `GET /repos/{owner}/{repo}/commits`: commits matching `query`
    ///
    /// Commits without any date are dropped.
    ///
    /// # Errors
    ///
    /// Returns `GithubError::Api` with status 409 for an empty repository,
    /// or any other API/transport error.
    pub async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        query: &CommitQuery,
    ) -> Result<Vec<Commit>, GithubError> {
        let responses: Vec<CommitResponse> = self
            .get_paginated(
                &format!("{}/repos/{owner}/{repo}/commits", self.base_url),
                &query.to_pairs(),
            )
            .await?;
        Ok(responses
            .into_iter()
            .filter_map(CommitResponse::into_commit)
            .collect())
    }

    /// `GET /repos/{owner}/{repo}/commits/{sha}`: line statistics of one commit
    ///
    /// # Errors
    ///
    /// Returns `GithubError::Api` if GitHub omits the stats or the request fails.
    pub async fn commit_stats(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<CommitStats, GithubError> {
        let response: CommitResponse = self
            .get_json(
                &format!("{}/repos/{owner}/{repo}/commits/{sha}", self.base_url),
                &[],
            )
            .await?;
        response
            .stats
            .map(CommitStats::from)
            .ok_or_else(|| GithubError::Api {
                status: 200,
                message: format!("commit {sha} has no stats"),
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, GithubError> {
        debug!(url = %url, "GET");
        let response = check_status(self.http.get(url).query(query).send().await?).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get_paginated<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, GithubError> {
        let mut items = Vec::new();
        let mut request = self.http.get(url).query(query);

        loop {
            debug!(url = %url, fetched = items.len(), "GET page");
            let response = check_status(request.send().await?).await?;
            let next = next_page_url(response.headers());
            let body = response.bytes().await?;
            let page: Vec<T> = serde_json::from_slice(&body)?;
            items.extend(page);

            match next {
                Some(next) => request = self.http.get(next),
                None => break,
            }
        }

        Ok(items)
    }
}

/// Turn a non-success response into `GithubError::Api`
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GithubError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            if text.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                text
            }
        });

    Err(GithubError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Extract the `rel="next"` target from a `Link` header
fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    parse_next_link(link)
}

fn parse_next_link(link: &str) -> Option<String> {
    link.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let is_next = segments.any(|s| s.trim() == "rel=\"next\"");
        if is_next && target.starts_with('<') && target.ends_with('>') {
            Some(target[1..target.len() - 1].to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use similar_asserts::assert_eq;

    #[test]
    fn test_parse_next_link() {
        let link = r#"<https://api.github.com/user/repos?page=2>; rel="next", <https://api.github.com/user/repos?page=5>; rel="last""#;
        assert_eq!(
            parse_next_link(link),
            Some("https://api.github.com/user/repos?page=2".to_string())
        );
    }

    #[test]
    fn test_parse_next_link_on_last_page() {
        let link = r#"<https://api.github.com/user/repos?page=1>; rel="prev", <https://api.github.com/user/repos?page=1>; rel="first""#;
        assert_eq!(parse_next_link(link), None);
    }

    #[test]
    fn test_parse_next_link_garbage() {
        assert_eq!(parse_next_link("not a link header"), None);
        assert_eq!(parse_next_link(""), None);
    }

    #[test]
    fn test_commit_query_pairs() {
        let query = CommitQuery::default()
            .author("octocat")
            .since(Utc.with_ymd_and_hms(2026, 1, 15, 15, 0, 0).unwrap())
            .until(Utc.with_ymd_and_hms(2026, 1, 16, 15, 0, 0).unwrap());
        let pairs = query.to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("per_page", "100".to_string()),
                ("author", "octocat".to_string()),
                ("since", "2026-01-15T15:00:00Z".to_string()),
                ("until", "2026-01-16T15:00:00Z".to_string()),
            ]
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GithubClient::with_base_url("token", "http://localhost:1234/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let result = GithubClient::new("bad\ntoken");
        assert!(matches!(result, Err(GithubError::InvalidToken { .. })));
    }

    #[test]
    fn test_repository_decodes_from_api_shape() {
        let json = r#"{"id": 1, "name": "hello", "full_name": "octocat/hello",
            "owner": {"login": "octocat", "id": 2}, "private": true, "fork": false}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "hello");
        assert_eq!(repo.owner.login, "octocat");
    }
}
