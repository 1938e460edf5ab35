//! # readme-pulse
//!
//! Refreshes a GitHub profile README with generated statistics images and
//! pushes the result. Point it at a profile repository, run it from cron or
//! a scheduled workflow, and the README's stats section stays current
//! without manual edits.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! The run is a linear batch pipeline. Each stage is a subcommand, and the
//! stages hand off through a JSON snapshot the next stage consumes:
//!
//! ```text
//! 1. Fetch     GitHub API     →  snapshot.json    (profile, language totals, line count)
//! 2. Render    snapshot       →  assets/stats/    (bar chart + summary card, PNG and SVG)
//! 3. Update    snapshot       →  README.md        (splice the marker-delimited section)
//! 4. Publish   working tree   →  origin           (stage, commit if dirty, push)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: the snapshot is human-readable JSON you can inspect
//!   when a run produced something unexpected.
//! - **Cheap iteration**: tweaking the chart or the README layout re-runs
//!   `render`/`update` against the saved snapshot, without re-hitting the
//!   API rate limit.
//! - **Testability**: everything after the fetch is a pure function of the
//!   snapshot, so tests drive the stages with synthetic data and never
//!   touch the network.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`github`] | API client — profile, paginated repo list, per-repo language breakdowns, best-effort clones |
//! | [`loc`] | Line-count estimator over a source tree (extension allowlist, decode fallback) |
//! | [`snapshot`] | The JSON snapshot handed between stages |
//! | [`render`] | Chart and card rendering, PNG via embedded bitmap font + SVG via maud |
//! | [`splice`] | Idempotent marker-delimited section replacement |
//! | [`section`] | README section body assembly and the on-disk update |
//! | [`publish`] | git2 stage/commit/push |
//! | [`numfmt`] | Compact count formatting (`16300` → `16,3k`) |
//! | [`config`] | The explicit per-run configuration record |
//! | [`output`] | CLI output formatting — pure `format_*` functions per stage |
//!
//! # Design Decisions
//!
//! ## Explicit Config, No Ambient Environment
//!
//! Environment variables are read exactly once, in `main`, through clap's
//! `env` support. Every stage takes a [`config::Config`] value. Leaf code
//! that needs the token or a path gets it handed in, which is what makes
//! the stages testable with synthetic configs.
//!
//! ## Best-Effort Per-Repository, Loud Top-Level
//!
//! One unreachable repository must not take down a pass over fifty of them,
//! so per-repo language fetches and clones return an explicit
//! fetched-vs-skipped result and the run continues. The profile and
//! repository-list fetches are different: without them there is nothing to
//! render, and those errors abort the run with the real cause.
//!
//! ## Hard Errors on Malformed Markers
//!
//! The README section is bounded by literal marker comments. Duplicate or
//! out-of-order markers mean the document's owned region is ambiguous;
//! splicing anyway would corrupt user content. [`splice`] refuses instead,
//! and the error names the offending marker.
//!
//! ## Self-Contained Rendering
//!
//! Both images are produced without a system font stack or native graphics
//! library: SVG is emitted as compile-time-checked maud markup, PNG is
//! painted pixel-by-pixel with an embedded 5×7 font through the pure-Rust
//! `image` encoder. The binary stays a single self-contained executable,
//! which is what lets it run on a bare scheduled runner.

pub mod config;
pub mod github;
pub mod loc;
pub mod numfmt;
pub mod output;
pub mod publish;
pub mod render;
pub mod section;
pub mod snapshot;
pub mod splice;
