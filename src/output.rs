//! CLI output formatting for all pipeline stages.
//!
//! Each stage has a `format_*` function returning `Vec<String>` and a
//! `print_*` wrapper that writes to stdout. Format functions are pure — no
//! I/O, no side effects — so tests assert on the exact lines without
//! capturing stdout.
//!
//! The display is information-first: what was fetched, what was skipped and
//! why, which files were written. Example of a full run:
//!
//! ```text
//! Fetched octocat: 8 repos, 4000 followers
//! Languages (6 repos counted, 1 skipped)
//!     Rust: 125000 bytes
//!     Python: 50000 bytes
//!     Skipped broken-repo: connection refused
//! Lines: 16,3k across 120 files
//!
//! Wrote assets/stats/github_stats_langs.png
//! ...
//! README section updated
//! Pushed refs/heads/main (a1b2c3d)
//! ```

use crate::github::{LanguageFetch, LanguageTotal, RepoLanguages};
use crate::loc::LineCount;
use crate::numfmt;
use crate::publish::PublishOutcome;
use crate::section::UpdateOutcome;
use crate::snapshot::StatsSnapshot;
use std::path::Path;

const INDENT: &str = "    ";

/// Fetch stage summary: profile headline, aggregated languages, per-repo
/// skips with their reasons, optional line count.
pub fn format_fetch_output(
    snapshot: &StatsSnapshot,
    fetches: &[RepoLanguages],
    totals: &[LanguageTotal],
) -> Vec<String> {
    let mut lines = vec![format!(
        "Fetched {}: {} repos, {} followers",
        snapshot.login, snapshot.repo_count, snapshot.follower_count
    )];

    let counted = fetches
        .iter()
        .filter(|f| matches!(f.fetch, LanguageFetch::Fetched(_)))
        .count();
    let skipped = fetches.len() - counted;
    lines.push(match skipped {
        0 => format!("Languages ({counted} repos counted)"),
        n => format!("Languages ({counted} repos counted, {n} skipped)"),
    });
    for total in totals {
        lines.push(format!("{INDENT}{}: {} bytes", total.name, total.bytes));
    }
    for fetch in fetches {
        if let LanguageFetch::Skipped(reason) = &fetch.fetch {
            lines.push(format!("{INDENT}Skipped {}: {}", fetch.repo, reason));
        }
    }

    if let (Some(total), Some(files)) = (snapshot.total_lines, snapshot.files_counted) {
        lines.push(format!(
            "Lines: {} across {} files",
            numfmt::abbreviate(total),
            files
        ));
    }
    lines
}

/// Clone-pass skips, one line per repository.
pub fn format_clone_skips(skipped: &[String]) -> Vec<String> {
    skipped
        .iter()
        .map(|s| format!("{INDENT}Clone skipped {s}"))
        .collect()
}

pub fn format_line_count(count: &LineCount) -> String {
    format!(
        "Counted {} lines in {} files",
        numfmt::abbreviate(count.total_lines),
        count.files_counted
    )
}

pub fn format_render_output(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| format!("Wrote {}", p.display()))
        .collect()
}

pub fn format_update_output(outcome: &UpdateOutcome, readme: &Path) -> Vec<String> {
    let line = if outcome.created {
        format!("Created {} with stats section", readme.display())
    } else if outcome.changed {
        format!("Updated stats section in {}", readme.display())
    } else {
        format!("{} already up to date", readme.display())
    };
    vec![line]
}

pub fn format_publish_output(outcome: &PublishOutcome) -> Vec<String> {
    match outcome {
        PublishOutcome::Clean => vec!["No changes to commit".to_string()],
        PublishOutcome::Pushed { commit, reference } => {
            vec![format!("Pushed {reference} ({commit})")]
        }
    }
}

/// Final status line for the full run.
pub fn format_status(username: &str, repo: &str, outcome: &PublishOutcome) -> String {
    match outcome {
        PublishOutcome::Clean => format!("{username}/{repo}: nothing changed"),
        PublishOutcome::Pushed { .. } => format!("{username}/{repo}: stats refreshed and pushed"),
    }
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
