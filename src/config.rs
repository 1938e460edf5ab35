//! Run configuration.
//!
//! Everything the pipeline needs to know is resolved once in `main` (CLI
//! flags backed by environment variables) and carried through the stages as
//! an explicit [`Config`] value. Leaf modules never read the environment
//! themselves — a function that needs the username takes the config, which
//! keeps every stage callable from tests with a synthetic config.

use std::path::{Path, PathBuf};

/// Markers bounding the tool-owned README section. Literal strings, matched
/// exactly; everything between them is overwritten on each run.
pub const START_MARKER: &str = "<!-- STATS:START -->";
pub const END_MARKER: &str = "<!-- STATS:END -->";

/// Commit message used when the working tree changed.
pub const COMMIT_MESSAGE: &str = "chore: update profile stats";

/// Resolved configuration for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub login whose profile and repositories are fetched.
    pub username: String,
    /// Name of the profile repository being updated. Defaults to the
    /// username, which is GitHub's profile-README convention.
    pub repo: String,
    /// Optional API token. Missing means unauthenticated requests at the
    /// lower anonymous rate limit.
    pub token: Option<String>,
    /// README file to splice, relative to the working directory.
    pub readme_path: PathBuf,
    /// Directory the generated images are written into.
    pub asset_dir: PathBuf,
    /// Directory for intermediate files (the stage snapshot, clone scratch).
    pub temp_dir: PathBuf,
    /// How many languages the bar chart shows.
    pub top_n: usize,
    /// Whether to clone non-fork repositories and count their lines.
    pub count_lines: bool,
}

impl Config {
    /// Deterministic output path for a generated image.
    ///
    /// `stem` is `langs` or `card`; `ext` is `png` or `svg`.
    pub fn image_path(&self, stem: &str, ext: &str) -> PathBuf {
        self.asset_dir.join(format!("github_stats_{stem}.{ext}"))
    }

    /// Image path as it appears inside the README (forward slashes, relative
    /// to the repository root).
    pub fn image_ref(&self, stem: &str, ext: &str) -> String {
        path_to_ref(&self.image_path(stem, ext))
    }

    /// Where the fetch stage writes its snapshot for later stages.
    pub fn snapshot_path(&self) -> PathBuf {
        self.temp_dir.join("snapshot.json")
    }

    /// Scratch directory for best-effort repository clones.
    pub fn clone_dir(&self) -> PathBuf {
        self.temp_dir.join("clones")
    }
}

/// Render a path with forward slashes for use inside markdown/HTML, where
/// backslashes would break image references on non-Windows viewers.
fn path_to_ref(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
