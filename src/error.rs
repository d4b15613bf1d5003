//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `repo-sweep` application. It uses the `thiserror` library to create an
//! `Error` enum covering every anticipated failure mode, providing clear and
//! descriptive error messages.
//!
//! The failure modes fall into three families:
//!
//! - **Remote**: the paginated repository listing failed (network problem,
//!   non-success HTTP status, unusable response body). Listing is fail-fast;
//!   a failed page aborts the whole enumeration with no partial result.
//! - **Clone**: the external `git clone` process failed, could not be
//!   located on `PATH`, or (in keep-going mode) several tasks failed and the
//!   failures are reported as one aggregate.
//! - **Filesystem**: the destination root could not be created, already
//!   exists, or a file could not be read during the post-clone walk.
//!
//! Every error in this crate is treated as unrecoverable at the point of
//! detection: the run stops and reports the triggering error. Working copies
//! cloned before the failure remain on disk.

use thiserror::Error;

/// Main error type for repo-sweep operations
#[derive(Error, Debug)]
pub enum Error {
    /// The remote listing endpoint failed or returned a non-success status.
    #[error("Repository listing error for {url}: {message}")]
    Remote { url: String, message: String },

    /// An error occurred while cloning a Git repository.
    ///
    /// Includes the repository URL, the captured stderr of the failed
    /// process, and an optional hint for resolution.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// The `git` executable could not be located on `PATH`.
    #[error("git executable not found: {message}\n  hint: {hint}")]
    GitNotFound { message: String, hint: String },

    /// Aggregate report for keep-going runs where one or more tasks failed.
    #[error("{} clone task(s) failed:\n{}", failures.len(), failures.iter().map(|(url, message)| format!("  {}: {}", url, message)).collect::<Vec<_>>().join("\n"))]
    CloneFailures { failures: Vec<(String, String)> },

    /// The destination root for a run already exists.
    ///
    /// Cloning never merges into an existing tree; the caller must pick a
    /// fresh destination.
    #[error("Destination directory already exists: {path}")]
    DestinationExists { path: String },

    /// A clone URL carries no usable repository name in its path.
    #[error("Cannot derive a repository name from clone URL: {url}")]
    RepositoryName { url: String },

    /// An error occurred with a path-related operation.
    #[error("Path operation error: {message}")]
    Path { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
