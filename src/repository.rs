//! # Repository Data Model
//!
//! The types exchanged between the listing, planning, and cloning stages.
//!
//! A [`Repository`] is produced once by the remote listing and is immutable
//! afterwards: it carries the canonical clone URL and the short name derived
//! from it. The short name doubles as the destination subdirectory for the
//! working copy, so the derivation parses the URL properly instead of
//! indexing into a split path: a URL whose path carries no usable final
//! segment is rejected with a descriptive error rather than silently
//! producing an empty or wrong directory name.
//!
//! A [`CloneTask`] pairs one repository with its resolved absolute
//! destination directory. Tasks are created by the orchestrator when feeding
//! the worker queue and are consumed exactly once by exactly one worker.

use std::path::PathBuf;

use url::Url;

use crate::error::{Error, Result};

/// One remote repository discovered by the listing stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    clone_url: String,
    short_name: String,
}

impl Repository {
    /// Build a `Repository` from its canonical clone URL.
    ///
    /// Fails if the URL cannot be parsed or carries no usable repository
    /// name in its path.
    pub fn from_clone_url(clone_url: &str) -> Result<Self> {
        let short_name = derive_short_name(clone_url)?;
        Ok(Self {
            clone_url: clone_url.to_string(),
            short_name,
        })
    }

    /// The canonical clone URL, exactly as the listing returned it.
    pub fn clone_url(&self) -> &str {
        &self.clone_url
    }

    /// The short name: last path segment of the clone URL, without any
    /// trailing `.git`. Used as the destination subdirectory name.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }
}

/// A unit of work: one repository paired with its destination directory.
#[derive(Debug, Clone)]
pub struct CloneTask {
    pub repository: Repository,
    pub destination: PathBuf,
}

/// Derive a filesystem-safe short name from a clone URL.
///
/// Takes the last non-empty path segment (tolerating a trailing slash) and
/// strips a `.git` suffix. Rejects URLs with no such segment.
fn derive_short_name(clone_url: &str) -> Result<String> {
    let parsed = Url::parse(clone_url)?;
    let segment = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .ok_or_else(|| Error::RepositoryName {
            url: clone_url.to_string(),
        })?;

    let name = segment.strip_suffix(".git").unwrap_or(segment);
    if name.is_empty() {
        return Err(Error::RepositoryName {
            url: clone_url.to_string(),
        });
    }

    Ok(name.to_string())
}
