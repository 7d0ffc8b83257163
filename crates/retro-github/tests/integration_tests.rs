//! Integration tests for retro-github
//!
//! These tests run the fetcher against a local mock of the GitHub REST API.

use chrono::{NaiveDate, Utc};
use mockito::{Matcher, Server, ServerGuard};
use retro_github::{
    CommitFetcher, CommitStats, CommitWindow, FetchOptions, GithubClient, GithubError,
    PERSONAL_LABEL,
};
use serde_json::{Value, json};
use similar_asserts::assert_eq;

const TOKEN: &str = "ghp_test_token";
const USER: &str = "octocat";

fn window() -> CommitWindow {
    CommitWindow::for_day(NaiveDate::from_ymd_opt(2026, 1, 16).unwrap(), &Utc)
}

fn sha(seed: u32) -> String {
    format!("{seed:040x}")
}

fn commit_json(seed: u32, message: &str, login: Option<&str>, date: &str) -> Value {
    json!({
        "sha": sha(seed),
        "html_url": format!("https://github.com/o/r/commit/{}", sha(seed)),
        "commit": {
            "message": message,
            "author": {"name": "Octo", "email": "octo@example.com", "date": date},
            "committer": {"name": "Octo", "email": "octo@example.com", "date": date}
        },
        "author": login.map(|l| json!({"login": l})),
    })
}

fn stats_json(seed: u32, additions: u64, deletions: u64) -> Value {
    let mut commit = commit_json(seed, "ignored", Some(USER), "2026-01-16T10:00:00Z");
    commit["stats"] = json!({"additions": additions, "deletions": deletions, "total": additions + deletions});
    commit
}

fn repo_json(owner: &str, name: &str) -> Value {
    json!({"name": name, "full_name": format!("{owner}/{name}"), "owner": {"login": owner}, "private": false})
}

async fn mock_user(server: &mut ServerGuard) {
    server
        .mock("GET", "/user")
        .match_query(Matcher::Any)
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"login": USER}).to_string())
        .create_async()
        .await;
}

async fn mock_list(server: &mut ServerGuard, path: &str, body: Value) {
    server
        .mock("GET", path)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;
}

fn fetcher(server: &ServerGuard) -> CommitFetcher {
    let client = GithubClient::with_base_url(TOKEN, server.url()).expect("client");
    CommitFetcher::new(client, USER)
}

#[tokio::test]
async fn test_fetch_groups_personal_and_org_commits() {
    let mut server = Server::new_async().await;
    mock_user(&mut server).await;
    mock_list(&mut server, "/user/repos", json!([repo_json(USER, "repoA"), repo_json(USER, "repoB")])).await;
    mock_list(&mut server, "/user/orgs", json!([{"login": "acme"}])).await;
    mock_list(&mut server, "/orgs/acme/repos", json!([repo_json("acme", "api")])).await;

    let commits_a = server
        .mock("GET", "/repos/octocat/repoA/commits")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("author".into(), USER.into()),
            Matcher::UrlEncoded("since".into(), "2026-01-16T00:00:00Z".into()),
            Matcher::UrlEncoded("until".into(), "2026-01-17T00:00:00Z".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                commit_json(1, "fix bug", Some(USER), "2026-01-16T09:00:00Z"),
                commit_json(2, "add feature\n\nlong body", Some(USER), "2026-01-16T11:00:00Z"),
            ])
            .to_string(),
        )
        .create_async()
        .await;
    mock_list(&mut server, "/repos/octocat/repoB/commits", json!([])).await;
    mock_list(
        &mut server,
        "/repos/acme/api/commits",
        json!([
            commit_json(3, "org work", Some("OctoCat"), "2026-01-16T12:00:00Z"),
            commit_json(4, "someone else", Some("hubot"), "2026-01-16T12:00:00Z"),
            commit_json(5, "unmapped author", None, "2026-01-16T12:00:00Z"),
            commit_json(6, "too late", Some(USER), "2026-01-17T00:00:00Z"),
        ]),
    )
    .await;

    let report = fetcher(&server)
        .fetch(&window(), &FetchOptions::default())
        .await
        .expect("fetch");

    commits_a.assert_async().await;
    assert!(report.failures.is_empty());
    assert_eq!(report.groups.total_commits(), 3);

    let labels: Vec<_> = report.groups.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec![PERSONAL_LABEL, "acme"]);

    let repo_a = report.groups.commits(PERSONAL_LABEL, "repoA").expect("repoA");
    let subjects: Vec<_> = repo_a.iter().map(|c| c.subject()).collect();
    assert_eq!(subjects, vec!["fix bug", "add feature"]);
    assert!(repo_a.iter().all(|c| c.stats.is_none()));

    // Empty repositories are still present as entries
    assert_eq!(report.groups.commits(PERSONAL_LABEL, "repoB").map(<[_]>::len), Some(0));

    let api = report.groups.commits("acme", "api").expect("api");
    assert_eq!(api.len(), 1);
    assert_eq!(api[0].subject(), "org work");
}

#[tokio::test]
async fn test_failing_repository_is_skipped() {
    let mut server = Server::new_async().await;
    mock_user(&mut server).await;
    mock_list(&mut server, "/user/repos", json!([repo_json(USER, "empty"), repo_json(USER, "repoA")])).await;
    mock_list(&mut server, "/user/orgs", json!([])).await;
    server
        .mock("GET", "/repos/octocat/empty/commits")
        .match_query(Matcher::Any)
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": "Git Repository is empty."}).to_string())
        .create_async()
        .await;
    mock_list(
        &mut server,
        "/repos/octocat/repoA/commits",
        json!([commit_json(1, "fix bug", Some(USER), "2026-01-16T09:00:00Z")]),
    )
    .await;

    let report = fetcher(&server)
        .fetch(&window(), &FetchOptions::default())
        .await
        .expect("a single bad repository must not abort the fetch");

    assert_eq!(report.groups.total_commits(), 1);
    assert_eq!(report.failures.len(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.subject(), "Personal/empty");
    assert!(failure.reason.contains("409"));
    assert!(failure.reason.contains("Git Repository is empty."));
}

#[tokio::test]
async fn test_failing_organization_is_skipped() {
    let mut server = Server::new_async().await;
    mock_user(&mut server).await;
    mock_list(&mut server, "/user/repos", json!([])).await;
    mock_list(&mut server, "/user/orgs", json!([{"login": "locked"}, {"login": "acme"}])).await;
    server
        .mock("GET", "/orgs/locked/repos")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(json!({"message": "Resource protected by organization SAML enforcement."}).to_string())
        .create_async()
        .await;
    mock_list(&mut server, "/orgs/acme/repos", json!([repo_json("acme", "api")])).await;
    mock_list(
        &mut server,
        "/repos/acme/api/commits",
        json!([commit_json(3, "org work", Some(USER), "2026-01-16T12:00:00Z")]),
    )
    .await;

    let report = fetcher(&server)
        .fetch(&window(), &FetchOptions::default())
        .await
        .expect("fetch");

    assert_eq!(report.groups.total_commits(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].org, "locked");
    assert!(report.failures[0].repo.is_none());
}

#[tokio::test]
async fn test_rejected_token_propagates() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/user")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": "Bad credentials"}).to_string())
        .create_async()
        .await;

    let err = fetcher(&server)
        .fetch(&window(), &FetchOptions::default())
        .await
        .expect_err("bad credentials are fatal");

    assert!(err.is_unauthorized());
    match err {
        GithubError::Api { message, .. } => assert_eq!(message, "Bad credentials"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_stats_are_fetched_per_commit() {
    let mut server = Server::new_async().await;
    mock_user(&mut server).await;
    mock_list(&mut server, "/user/repos", json!([repo_json(USER, "repoA")])).await;
    mock_list(&mut server, "/user/orgs", json!([])).await;
    mock_list(
        &mut server,
        "/repos/octocat/repoA/commits",
        json!([
            commit_json(1, "fix bug", Some(USER), "2026-01-16T09:00:00Z"),
            commit_json(2, "add feature", Some(USER), "2026-01-16T11:00:00Z"),
        ]),
    )
    .await;
    mock_list(&mut server, &format!("/repos/octocat/repoA/commits/{}", sha(1)), stats_json(1, 5, 2)).await;
    server
        .mock("GET", format!("/repos/octocat/repoA/commits/{}", sha(2)).as_str())
        .match_query(Matcher::Any)
        .with_status(502)
        .create_async()
        .await;

    let report = fetcher(&server)
        .fetch(&window(), &FetchOptions::default().with_stats())
        .await
        .expect("fetch");

    let commits = report.groups.commits(PERSONAL_LABEL, "repoA").expect("repoA");
    assert_eq!(commits[0].stats, Some(CommitStats::new(5, 2)));
    assert_eq!(commits[1].stats, None);
    assert_eq!(report.missing_stats, vec![format!("Personal/repoA@{}", &sha(2)[..7])]);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_list_endpoints_follow_next_link() {
    let mut server = Server::new_async().await;
    let next = format!("{}/user/repos?page=2", server.url());
    server
        .mock("GET", "/user/repos")
        .match_query(Matcher::UrlEncoded("affiliation".into(), "owner".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("link", &format!(r#"<{next}>; rel="next", <{next}>; rel="last""#))
        .with_body(json!([repo_json(USER, "one")]).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/user/repos")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([repo_json(USER, "two")]).to_string())
        .create_async()
        .await;

    let client = GithubClient::with_base_url(TOKEN, server.url()).expect("client");
    let repos = client.list_owned_repos().await.expect("list");
    let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["one", "two"]);
}
