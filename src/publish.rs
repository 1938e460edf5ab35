//! Version-control side effects: stage, commit, push.
//!
//! Stage 4 of the pipeline. Stages everything (the regenerated images plus
//! the spliced README), commits with the fixed message when the tree
//! actually changed, and pushes the current branch to `origin`. A clean
//! tree produces no commit and no push.
//!
//! Unlike the per-repository fetches, version-control errors propagate: a
//! failed push means the run failed, and the operator should see it.

use git2::{Cred, IndexAddOption, PushOptions, RemoteCallbacks, Repository, Signature};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

/// What the publish stage did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Nothing changed; no commit, no push.
    Clean,
    /// A commit was created and pushed.
    Pushed {
        /// Short commit id.
        commit: String,
        /// Branch reference that was pushed, e.g. `refs/heads/main`.
        reference: String,
    },
}

/// Stage all changes and commit if the tree differs from HEAD.
///
/// Returns the new commit's short id, or `None` for a clean tree. Handles
/// the unborn-branch case (fresh repository with no commits yet).
pub fn stage_and_commit(workdir: &Path, message: &str) -> Result<Option<String>, PublishError> {
    let repo = Repository::open(workdir)?;

    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.write()?;
    let tree_id = index.write_tree()?;

    let head_commit = repo
        .head()
        .ok()
        .and_then(|h| h.peel_to_commit().ok());

    if let Some(head) = &head_commit {
        if head.tree_id() == tree_id {
            return Ok(None);
        }
    }

    let sig = signature(&repo)?;
    let tree = repo.find_tree(tree_id)?;
    let parents: Vec<&git2::Commit> = head_commit.iter().collect();
    let oid = repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;

    Ok(Some(oid.to_string()[..7].to_string()))
}

/// Push the current branch to `origin`.
///
/// With a token configured, authenticates over HTTPS as `x-access-token`
/// (the scheme GitHub expects for installation/PAT pushes); otherwise falls
/// back to default credentials (SSH agent, credential helper).
pub fn push(workdir: &Path, token: Option<&str>) -> Result<String, PublishError> {
    let repo = Repository::open(workdir)?;
    let head = repo.head()?;
    let reference = head
        .name()
        .ok_or_else(|| git2::Error::from_str("HEAD is not a named reference"))?
        .to_string();

    let mut remote = repo.find_remote("origin")?;

    let mut callbacks = RemoteCallbacks::new();
    let token = token.map(str::to_string);
    callbacks.credentials(move |_url, username_from_url, _allowed| match &token {
        Some(t) => Cred::userpass_plaintext("x-access-token", t),
        None => Cred::default().or_else(|_| {
            Cred::username(username_from_url.unwrap_or("git"))
        }),
    });
    let mut options = PushOptions::new();
    options.remote_callbacks(callbacks);

    remote.push(&[reference.as_str()], Some(&mut options))?;
    Ok(reference)
}

/// Stage, commit, push — the whole stage in one call.
pub fn commit_and_push(
    workdir: &Path,
    message: &str,
    token: Option<&str>,
) -> Result<PublishOutcome, PublishError> {
    match stage_and_commit(workdir, message)? {
        None => Ok(PublishOutcome::Clean),
        Some(commit) => {
            let reference = push(workdir, token)?;
            Ok(PublishOutcome::Pushed { commit, reference })
        }
    }
}

/// The repository's configured signature, or a tool identity when the host
/// has no `user.name`/`user.email` (bare CI runners).
fn signature(repo: &Repository) -> Result<Signature<'static>, git2::Error> {
    repo.signature()
        .or_else(|_| Signature::now("readme-pulse", "readme-pulse@invalid"))
}
