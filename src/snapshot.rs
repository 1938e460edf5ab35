//! The snapshot handed between pipeline stages.
//!
//! `fetch` writes a pretty-printed `snapshot.json` into the temp directory;
//! `render`, `update`, and `check` consume it. The snapshot is ephemeral —
//! recomputed on every fetch, never treated as history — but materializing
//! it as JSON keeps each stage independently runnable and the intermediate
//! state inspectable when a run goes wrong.

use crate::github::{LanguageTotal, UserProfile};
use crate::loc::LineCount;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything later stages need, frozen at fetch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Join date, `YYYY-MM-DD`.
    pub joined: String,
    pub repo_count: u64,
    pub follower_count: u64,
    /// Aggregated totals in first-seen order, not yet ranked.
    pub languages: Vec<LanguageTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_lines: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_counted: Option<u64>,
    /// ISO-8601 UTC timestamp of the fetch.
    pub generated_at: String,
}

impl StatsSnapshot {
    pub fn new(
        profile: &UserProfile,
        languages: Vec<LanguageTotal>,
        lines: Option<LineCount>,
    ) -> Self {
        Self {
            login: profile.login.clone(),
            name: profile.name.clone(),
            bio: profile.bio.clone(),
            joined: profile.joined().to_string(),
            repo_count: profile.public_repos,
            follower_count: profile.followers,
            languages,
            total_lines: lines.map(|l| l.total_lines),
            files_counted: lines.map(|l| l.files_counted),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
