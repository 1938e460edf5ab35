//! README section assembly and update.
//!
//! Stage 3 of the pipeline. Builds the tool-owned markdown block from a
//! snapshot and splices it into the README between the
//! [`START_MARKER`](crate::config::START_MARKER) /
//! [`END_MARKER`](crate::config::END_MARKER) pair. The block references the
//! chart PNG as a markdown image and the card SVG through an `<img>` tag
//! (GitHub renders both; the SVG stays crisp on high-DPI displays), followed
//! by the stats bullets and the fetch timestamp.
//!
//! The body is fully determined by the snapshot and config, so re-running
//! `update` without a fresh fetch is a no-op — the outcome reports whether
//! the file actually changed.

use crate::config::{Config, END_MARKER, START_MARKER};
use crate::numfmt;
use crate::snapshot::StatsSnapshot;
use crate::splice::{self, SpliceError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("README splice error: {0}")]
    Splice(#[from] SpliceError),
}

/// Result of an update pass.
#[derive(Debug, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// False when the README already contained exactly this section.
    pub changed: bool,
    /// True when the README did not exist and was created.
    pub created: bool,
}

/// Build the section body spliced between the markers.
///
/// Starts and ends with a newline so the markers sit on their own lines.
pub fn section_body(config: &Config, snapshot: &StatsSnapshot) -> String {
    let mut body = String::new();
    body.push('\n');
    body.push_str(&format!(
        "![Top languages]({})\n\n",
        config.image_ref("langs", "png")
    ));
    body.push_str(&format!(
        "<img src=\"{}\" alt=\"profile summary\">\n\n",
        config.image_ref("card", "svg")
    ));
    body.push_str(&format!("- **Repos:** {}\n", snapshot.repo_count));
    body.push_str(&format!("- **Followers:** {}\n", snapshot.follower_count));
    if let (Some(lines), Some(files)) = (snapshot.total_lines, snapshot.files_counted) {
        body.push_str(&format!(
            "- **Lines of code:** {} across {} files\n",
            numfmt::abbreviate(lines),
            files
        ));
    }
    body.push_str(&format!("- **Updated (UTC):** {}\n", snapshot.generated_at));
    body
}

/// Splice the section into the README on disk.
///
/// A missing README is seeded with a `# <username>` heading first, matching
/// what a fresh profile repository would contain.
pub fn update_readme(config: &Config, snapshot: &StatsSnapshot) -> Result<UpdateOutcome, UpdateError> {
    let created = !config.readme_path.exists();
    let current = if created {
        format!("# {}\n", config.username)
    } else {
        std::fs::read_to_string(&config.readme_path)?
    };

    let body = section_body(config, snapshot);
    let next = splice::replace_section(&current, START_MARKER, END_MARKER, &body)?;

    let changed = created || next != current;
    if changed {
        std::fs::write(&config.readme_path, &next)?;
    }
    Ok(UpdateOutcome { changed, created })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn config(readme: PathBuf) -> Config {
        Config {
            username: "octocat".into(),
            repo: "octocat".into(),
            token: None,
            readme_path: readme,
            asset_dir: PathBuf::from("assets/stats"),
            temp_dir: PathBuf::from(".readme-pulse-temp"),
            top_n: 8,
            count_lines: false,
        }
    }

    fn snapshot() -> StatsSnapshot {
        StatsSnapshot {
            login: "octocat".into(),
            name: None,
            bio: None,
            joined: "2011-01-25".into(),
            repo_count: 8,
            follower_count: 4000,
            languages: Vec::new(),
            total_lines: Some(16300),
            files_counted: Some(120),
            generated_at: "2026-08-26T12:00:00Z".into(),
        }
    }

    #[test]
    fn body_references_both_images() {
        let body = section_body(&config(PathBuf::from("README.md")), &snapshot());
        assert!(body.contains("![Top languages](assets/stats/github_stats_langs.png)"));
        assert!(body.contains("<img src=\"assets/stats/github_stats_card.svg\""));
    }

    #[test]
    fn body_bullets_and_timestamp() {
        let body = section_body(&config(PathBuf::from("README.md")), &snapshot());
        assert!(body.contains("- **Repos:** 8\n"));
        assert!(body.contains("- **Followers:** 4000\n"));
        assert!(body.contains("- **Lines of code:** 16,3k across 120 files\n"));
        assert!(body.contains("- **Updated (UTC):** 2026-08-26T12:00:00Z\n"));
    }

    #[test]
    fn body_omits_line_bullet_without_count() {
        let mut s = snapshot();
        s.total_lines = None;
        s.files_counted = None;
        let body = section_body(&config(PathBuf::from("README.md")), &s);
        assert!(!body.contains("Lines of code"));
    }

    #[test]
    fn update_creates_missing_readme_with_heading() {
        let dir = tempdir().unwrap();
        let readme = dir.path().join("README.md");
        let outcome = update_readme(&config(readme.clone()), &snapshot()).unwrap();
        assert!(outcome.created);
        assert!(outcome.changed);

        let content = fs::read_to_string(&readme).unwrap();
        assert!(content.starts_with("# octocat\n"));
        assert!(content.contains(START_MARKER));
        assert!(content.contains(END_MARKER));
    }

    #[test]
    fn update_preserves_user_content() {
        let dir = tempdir().unwrap();
        let readme = dir.path().join("README.md");
        fs::write(&readme, "# Hi\n\nHand-written intro.\n").unwrap();

        update_readme(&config(readme.clone()), &snapshot()).unwrap();
        let content = fs::read_to_string(&readme).unwrap();
        assert!(content.starts_with("# Hi\n\nHand-written intro.\n"));
    }

    #[test]
    fn second_update_with_same_snapshot_is_unchanged() {
        let dir = tempdir().unwrap();
        let readme = dir.path().join("README.md");
        let cfg = config(readme.clone());
        let snap = snapshot();

        update_readme(&cfg, &snap).unwrap();
        let first = fs::read_to_string(&readme).unwrap();

        let outcome = update_readme(&cfg, &snap).unwrap();
        assert!(!outcome.changed);
        assert_eq!(fs::read_to_string(&readme).unwrap(), first);
    }

    #[test]
    fn update_replaces_stale_section() {
        let dir = tempdir().unwrap();
        let readme = dir.path().join("README.md");
        fs::write(
            &readme,
            format!("# Hi\n{START_MARKER}\nold stats\n{END_MARKER}\ntail\n"),
        )
        .unwrap();

        update_readme(&config(readme.clone()), &snapshot()).unwrap();
        let content = fs::read_to_string(&readme).unwrap();
        assert!(!content.contains("old stats"));
        assert!(content.contains("- **Repos:** 8"));
        assert!(content.ends_with("tail\n"));
    }
}
