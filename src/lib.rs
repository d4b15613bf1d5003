//! # Repo Sweep Library
//!
//! This library provides the core functionality for bulk-cloning every
//! public repository of a remote account and streaming the textual contents
//! of the resulting working copies. It is designed to be used by the
//! `repo-sweep` command-line tool but can also be driven by other front
//! ends that want to observe and assert on failures instead of terminating
//! the process.
//!
//! ## Quick Example
//!
//! ```
//! use repo_sweep::planner;
//! use repo_sweep::repository::Repository;
//!
//! // Short names are derived by parsing the clone URL properly.
//! let repo = Repository::from_clone_url("https://github.com/acme/widget.git").unwrap();
//! assert_eq!(repo.short_name(), "widget");
//!
//! // Small batches get half as many workers as tasks, large ones are capped.
//! assert_eq!(planner::worker_count(3), 1);
//! assert_eq!(planner::worker_count(10_000), 50);
//! ```
//!
//! ## Execution Flow
//!
//! One invocation runs the following stages, each in its own module:
//!
//! 1.  **Listing (`remote`)**: walk the account's paginated repository
//!     listing until the cursor runs out, accumulating the full set before
//!     any work begins.
//! 2.  **Planning (`planner`)**: decide the worker-pool size once from the
//!     number of discovered repositories.
//! 3.  **Cloning (`cloner`)**: fan the repositories out over a fixed pool of
//!     workers sharing one task queue; each task shells out to `git clone`
//!     (`git`) with its own destination subdirectory.
//! 4.  **Reading (`reader`)**: optionally walk the destination tree and
//!     print every non-excluded file's contents.
//!
//! Every stage is fail-fast: the first error aborts the run (the cloning
//! stage can optionally collect per-task failures instead; see
//! [`cloner::FailureMode`]). Error variants for all stages live in
//! [`error::Error`].

pub mod cloner;
pub mod error;
pub mod git;
pub mod output;
pub mod planner;
pub mod reader;
pub mod remote;
pub mod repository;

#[cfg(test)]
mod planner_proptest;
