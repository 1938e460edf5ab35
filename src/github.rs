//! GitHub API client and language aggregation.
//!
//! Stage 1 of the pipeline. Fetches the account profile and repository list,
//! then walks the non-fork repositories collecting per-repo language
//! breakdowns (and, optionally, shallow working copies for line counting).
//!
//! ## Failure Policy
//!
//! The profile and repository-list fetches are essential: without them there
//! is nothing to render, so their errors propagate and abort the run. The
//! per-repository fetches (language breakdown, clone) are best-effort: one
//! unreachable repository contributes nothing and is reported as skipped,
//! but never takes down the aggregation pass. That distinction is kept
//! explicit in [`LanguageFetch`] rather than hidden behind an empty default,
//! so callers can tell "no bytes reported" from "fetch failed".
//!
//! ## Rate Limits
//!
//! Requests carry `Authorization: Bearer <token>` when a token is
//! configured. Unauthenticated runs work but hit the anonymous rate limit
//! quickly on accounts with many repositories.

use crate::config::Config;
use crate::loc::{self, LineCount};
use serde::Deserialize;
use serde::de::{MapAccess, Visitor};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const API_ROOT: &str = "https://api.github.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const REPOS_PER_PAGE: u32 = 100;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Account-level metadata for the tracked user.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    /// Join date, RFC 3339 as returned by the API.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
}

impl UserProfile {
    /// Display name, falling back to the login for accounts without one.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.login)
    }

    /// Join date truncated to `YYYY-MM-DD`.
    pub fn joined(&self) -> &str {
        let end = self.created_at.len().min(10);
        &self.created_at[..end]
    }
}

/// One entry of the repository listing. Only the fields the pipeline reads.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    #[serde(default)]
    pub fork: bool,
    pub languages_url: Option<String>,
    pub clone_url: Option<String>,
}

/// Per-repository language breakdown result.
#[derive(Debug, Clone)]
pub struct RepoLanguages {
    pub repo: String,
    pub fetch: LanguageFetch,
}

/// Outcome of one best-effort per-repository fetch.
#[derive(Debug, Clone)]
pub enum LanguageFetch {
    /// `(language, bytes)` pairs in the order the API reported them.
    Fetched(Vec<(String, u64)>),
    /// The breakdown could not be fetched; contributes nothing.
    Skipped(String),
}

/// One repository's language breakdown, deserialized from the API's JSON
/// object while keeping document order. A plain map type would re-sort the
/// keys, and the aggregation's tie-break depends on first-seen order.
#[derive(Debug, Clone)]
struct LanguageBreakdown(Vec<(String, u64)>);

impl<'de> Deserialize<'de> for LanguageBreakdown {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = LanguageBreakdown;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of language name to byte count")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, u64>()? {
                    entries.push(entry);
                }
                Ok(LanguageBreakdown(entries))
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}

/// Aggregated byte count for one language across all counted repositories.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LanguageTotal {
    pub name: String,
    pub bytes: u64,
}

pub struct GithubClient {
    http: reqwest::blocking::Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("readme-pulse/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            token: config.token.clone(),
        })
    }

    fn get(&self, url: &str) -> reqwest::blocking::RequestBuilder {
        let req = self.http.get(url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Fetch the account profile. Essential — errors abort the run.
    pub fn fetch_user(&self, login: &str) -> Result<UserProfile, FetchError> {
        let profile = self
            .get(&format!("{API_ROOT}/users/{login}"))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(profile)
    }

    /// Fetch the full repository list, following pagination until a page
    /// comes back empty. Essential — errors abort the run.
    pub fn fetch_repos(&self, login: &str) -> Result<Vec<RepoSummary>, FetchError> {
        let mut repos = Vec::new();
        for page in 1u32.. {
            let batch: Vec<RepoSummary> = self
                .get(&format!("{API_ROOT}/users/{login}/repos"))
                .query(&[("per_page", REPOS_PER_PAGE), ("page", page)])
                .send()?
                .error_for_status()?
                .json()?;
            if batch.is_empty() {
                break;
            }
            repos.extend(batch);
        }
        Ok(repos)
    }

    /// Fetch the language breakdown for every non-fork repository.
    ///
    /// Forks are excluded entirely. A repository without a `languages_url`,
    /// or whose fetch fails, yields [`LanguageFetch::Skipped`] with the
    /// reason; the pass itself never fails.
    pub fn fetch_language_breakdowns(&self, repos: &[RepoSummary]) -> Vec<RepoLanguages> {
        repos
            .iter()
            .filter(|r| !r.fork)
            .map(|r| RepoLanguages {
                repo: r.name.clone(),
                fetch: match &r.languages_url {
                    None => LanguageFetch::Skipped("no languages endpoint".into()),
                    Some(url) => match self.fetch_languages(url) {
                        Ok(langs) => LanguageFetch::Fetched(langs),
                        Err(e) => LanguageFetch::Skipped(e.to_string()),
                    },
                },
            })
            .collect()
    }

    fn fetch_languages(&self, url: &str) -> Result<Vec<(String, u64)>, FetchError> {
        let breakdown: LanguageBreakdown = self.get(url).send()?.error_for_status()?.json()?;
        Ok(breakdown.0)
    }
}

/// Sum byte counts per language across all fetched breakdowns.
///
/// Languages keep the order they were first seen in, so the later stable
/// top-N sort breaks byte-count ties by first appearance. Skipped
/// repositories contribute nothing.
pub fn aggregate_language_bytes(fetches: &[RepoLanguages]) -> Vec<LanguageTotal> {
    let mut totals: Vec<LanguageTotal> = Vec::new();
    for entry in fetches {
        let LanguageFetch::Fetched(langs) = &entry.fetch else {
            continue;
        };
        for (name, bytes) in langs {
            match totals.iter_mut().find(|t| &t.name == name) {
                Some(t) => t.bytes += *bytes,
                None => totals.push(LanguageTotal {
                    name: name.clone(),
                    bytes: *bytes,
                }),
            }
        }
    }
    totals
}

/// Keep the `n` largest languages, descending by bytes. The sort is stable,
/// so ties preserve first-seen order.
pub fn top_languages(mut totals: Vec<LanguageTotal>, n: usize) -> Vec<LanguageTotal> {
    totals.sort_by_key(|t| std::cmp::Reverse(t.bytes));
    totals.truncate(n);
    totals
}

/// Clone every non-fork repository into `clone_dir` and count its lines.
///
/// Best-effort like the language pass: a repository that fails to clone is
/// reported by name and contributes zero. Existing scratch directories from
/// a previous run are removed before re-cloning.
pub fn clone_and_count(repos: &[RepoSummary], clone_dir: &Path) -> (LineCount, Vec<String>) {
    let mut count = LineCount::default();
    let mut skipped = Vec::new();

    for repo in repos.iter().filter(|r| !r.fork) {
        let Some(url) = &repo.clone_url else {
            skipped.push(format!("{}: no clone URL", repo.name));
            continue;
        };
        let dest = clone_dir.join(&repo.name);
        if dest.exists() {
            let _ = std::fs::remove_dir_all(&dest);
        }
        match git2::Repository::clone(url, &dest) {
            Ok(_) => count.absorb(loc::count_tree(&dest)),
            Err(e) => skipped.push(format!("{}: {}", repo.name, e.message())),
        }
    }

    (count, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetched(repo: &str, langs: &[(&str, u64)]) -> RepoLanguages {
        RepoLanguages {
            repo: repo.into(),
            fetch: LanguageFetch::Fetched(
                langs.iter().map(|(n, b)| (n.to_string(), *b)).collect(),
            ),
        }
    }

    #[test]
    fn breakdown_deserializes_in_document_order() {
        let json = r#"{"Zig": 5, "Ada": 5, "C": 1}"#;
        let breakdown: LanguageBreakdown = serde_json::from_str(json).unwrap();
        assert_eq!(
            breakdown.0,
            vec![
                ("Zig".to_string(), 5),
                ("Ada".to_string(), 5),
                ("C".to_string(), 1),
            ]
        );
    }

    fn skipped(repo: &str) -> RepoLanguages {
        RepoLanguages {
            repo: repo.into(),
            fetch: LanguageFetch::Skipped("connection refused".into()),
        }
    }

    #[test]
    fn aggregates_across_repositories() {
        let fetches = vec![
            fetched("a", &[("Rust", 100), ("Python", 50)]),
            fetched("b", &[("Rust", 25)]),
        ];
        let totals = aggregate_language_bytes(&fetches);
        assert_eq!(
            totals,
            vec![
                LanguageTotal { name: "Rust".into(), bytes: 125 },
                LanguageTotal { name: "Python".into(), bytes: 50 },
            ]
        );
    }

    #[test]
    fn tie_break_follows_reported_order_not_alphabetical() {
        // "Zig" is reported before "Ada"; equal byte counts must keep that
        // order through aggregation and the stable top-N sort.
        let fetches = vec![fetched("a", &[("Zig", 10), ("Ada", 10)])];
        let top = top_languages(aggregate_language_bytes(&fetches), 2);
        assert_eq!(top[0].name, "Zig");
        assert_eq!(top[1].name, "Ada");
    }

    #[test]
    fn skipped_repo_leaves_others_unaffected() {
        let fetches = vec![
            fetched("a", &[("Go", 10)]),
            skipped("broken"),
            fetched("c", &[("Go", 5)]),
        ];
        let totals = aggregate_language_bytes(&fetches);
        assert_eq!(totals, vec![LanguageTotal { name: "Go".into(), bytes: 15 }]);
    }

    #[test]
    fn empty_fetches_aggregate_to_nothing() {
        assert!(aggregate_language_bytes(&[]).is_empty());
    }

    #[test]
    fn forks_are_never_queried() {
        // fetch_language_breakdowns filters forks before building requests;
        // a fork with no languages_url must not even produce a Skipped entry.
        let repos = vec![
            RepoSummary {
                name: "fork".into(),
                fork: true,
                languages_url: None,
                clone_url: None,
            },
            RepoSummary {
                name: "own".into(),
                fork: false,
                languages_url: None,
                clone_url: None,
            },
        ];
        let own: Vec<_> = repos.iter().filter(|r| !r.fork).collect();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].name, "own");
    }

    #[test]
    fn top_n_sorts_descending_and_truncates() {
        let totals = vec![
            LanguageTotal { name: "C".into(), bytes: 5 },
            LanguageTotal { name: "Rust".into(), bytes: 100 },
            LanguageTotal { name: "Go".into(), bytes: 40 },
        ];
        let top = top_languages(totals, 2);
        assert_eq!(top[0].name, "Rust");
        assert_eq!(top[1].name, "Go");
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn top_n_ties_keep_first_seen_order() {
        let totals = vec![
            LanguageTotal { name: "First".into(), bytes: 10 },
            LanguageTotal { name: "Second".into(), bytes: 10 },
        ];
        let top = top_languages(totals, 2);
        assert_eq!(top[0].name, "First");
        assert_eq!(top[1].name, "Second");
    }

    #[test]
    fn display_name_falls_back_to_login() {
        let profile = UserProfile {
            login: "octocat".into(),
            name: None,
            bio: None,
            created_at: "2011-01-25T18:44:36Z".into(),
            public_repos: 8,
            followers: 4000,
        };
        assert_eq!(profile.display_name(), "octocat");
        assert_eq!(profile.joined(), "2011-01-25");
    }

    #[test]
    fn repo_summary_deserializes_from_api_shape() {
        let json = r#"{
            "name": "hello-world",
            "fork": false,
            "languages_url": "https://api.github.com/repos/octocat/hello-world/languages",
            "clone_url": "https://github.com/octocat/hello-world.git",
            "stargazers_count": 80
        }"#;
        let repo: RepoSummary = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "hello-world");
        assert!(!repo.fork);
        assert!(repo.languages_url.is_some());
    }
}
