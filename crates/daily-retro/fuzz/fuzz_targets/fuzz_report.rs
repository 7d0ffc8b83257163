#![no_main]

//! Fuzz target for report generation
//!
//! Arbitrary groupings (odd labels, multi-line and empty messages, missing
//! stats, extreme line counts) must render without panicking, and the
//! summary line must always carry the real total.

use arbitrary::Arbitrary;
use chrono::{NaiveDate, TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

use daily_retro::report::{NO_COMMITS_LINE, generate_report};
use daily_retro::summarize::build_prompt;
use retro_github::{Commit, CommitGroups, CommitStats};

#[derive(Debug, Arbitrary)]
struct FuzzCommit {
    org: String,
    repo: String,
    message: String,
    stats: Option<(u32, u32)>,
}

fuzz_target!(|input: (u16, Vec<FuzzCommit>)| {
    let (day, commits) = input;
    let date = NaiveDate::from_ymd_opt(2026, 1, 1)
        .and_then(|d| d.checked_add_days(chrono::Days::new(u64::from(day))))
        .unwrap_or_default();
    let timestamp = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let mut groups = CommitGroups::new();
    for c in commits {
        groups.push(
            &c.org,
            &c.repo,
            Commit {
                sha: "0".repeat(40),
                message: c.message,
                author_login: None,
                timestamp,
                html_url: String::new(),
                stats: c
                    .stats
                    .map(|(a, d)| CommitStats::new(u64::from(a), u64::from(d))),
            },
        );
    }

    let report = generate_report(&groups, date);
    let total = groups.total_commits();
    if total == 0 {
        assert!(report.text().ends_with(NO_COMMITS_LINE));
    } else {
        assert!(report.text().contains(&format!("이 날 총 {total}개의 커밋을 수행했습니다.")));
    }

    let _ = build_prompt(&groups);
});
