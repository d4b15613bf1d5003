//! # Clone Orchestration
//!
//! Drives the parallel cloning of a listed repository set into one
//! destination root. The orchestrator owns a bounded worker pool built from
//! a single shared task queue:
//!
//! 1. The destination root is resolved to an absolute path and created
//!    up-front, single-threaded, before any worker starts. An existing root
//!    is an error; there are no merge-with-existing semantics.
//! 2. A fixed number of scoped worker threads pull [`CloneTask`]s from one
//!    `crossbeam-channel` queue until it is closed and drained. The pool
//!    size comes from the sizing policy in [`crate::planner`], clamped to at
//!    least one worker for a non-empty set.
//! 3. The producer enqueues one task per repository in listing order, then
//!    closes the queue. Tasks complete in whatever order the workers finish
//!    them; the run reports only after every worker has exited.
//!
//! Each task's destination subdirectory is created by the external clone
//! itself, and every worker writes only to its own task's subdirectory, so
//! the queue (plus the abort flag and failure list) is the only shared
//! mutable state.
//!
//! The external clone step sits behind the [`CloneRunner`] trait so tests
//! can substitute a recording mock for the real `git` subprocess.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::thread;

use crossbeam_channel::unbounded;
use log::{debug, info};

use crate::error::{Error, Result};
use crate::git;
use crate::output::OutputConfig;
use crate::planner;
use crate::repository::{CloneTask, Repository};

/// How the orchestrator reacts to a failing clone task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Abort the whole run on the first failing task. Workers stop pulling
    /// new tasks; clones already in flight finish their process wait.
    #[default]
    FailFast,
    /// Attempt every task and report all failures as one aggregate error.
    KeepGoing,
}

/// The external clone step - allows mocking in tests
pub trait CloneRunner: Send + Sync {
    /// Materialize `url` as a working copy at `destination`.
    fn clone_repository(&self, url: &str, destination: &Path) -> Result<()>;
}

/// The default runner, which shells out to the system `git`.
pub struct GitCloneRunner {
    git: PathBuf,
    echo_output: bool,
}

impl GitCloneRunner {
    /// Locate `git` on `PATH` and build a runner around it.
    ///
    /// `echo_output` forwards the clone's stdout line-by-line as it streams.
    pub fn locate(echo_output: bool) -> Result<Self> {
        Ok(Self {
            git: git::locate_git()?,
            echo_output,
        })
    }
}

impl CloneRunner for GitCloneRunner {
    fn clone_repository(&self, url: &str, destination: &Path) -> Result<()> {
        git::clone(&self.git, url, destination, self.echo_output)
    }
}

/// Orchestrates one bulk-clone run.
pub struct CloneOrchestrator {
    failure_mode: FailureMode,
    output: OutputConfig,
}

impl CloneOrchestrator {
    pub fn new(failure_mode: FailureMode, output: OutputConfig) -> Self {
        Self {
            failure_mode,
            output,
        }
    }

    /// Clone every repository into a fresh `destination_root`.
    ///
    /// Enqueues one task per repository, fans them out over the worker pool,
    /// and blocks until every worker has exited. In fail-fast mode the first
    /// failure is returned as-is; in keep-going mode all failures are
    /// collected into [`Error::CloneFailures`]. Either way, working copies
    /// cloned before a failure remain on disk.
    pub fn run(
        &self,
        runner: &dyn CloneRunner,
        repositories: &[Repository],
        destination_root: &Path,
    ) -> Result<()> {
        let root = std::path::absolute(destination_root)?;
        if root.exists() {
            return Err(Error::DestinationExists {
                path: root.display().to_string(),
            });
        }
        fs::create_dir(&root)?;

        if repositories.is_empty() {
            debug!("no repositories to clone; pool degenerates to zero workers");
            return Ok(());
        }

        let workers = planner::worker_count(repositories.len()).max(1);
        info!(
            "cloning {} repositories with {} workers into {}",
            repositories.len(),
            workers,
            root.display()
        );

        let (sender, receiver) = unbounded::<CloneTask>();
        let abort = AtomicBool::new(false);
        let failures: Mutex<Vec<(String, Error)>> = Mutex::new(Vec::new());

        thread::scope(|scope| {
            for _ in 0..workers {
                let receiver = receiver.clone();
                let abort = &abort;
                let failures = &failures;
                scope.spawn(move || {
                    while let Ok(task) = receiver.recv() {
                        if self.failure_mode == FailureMode::FailFast
                            && abort.load(Ordering::Relaxed)
                        {
                            // A sibling already failed; drain without working.
                            continue;
                        }
                        self.process(runner, task, abort, failures);
                    }
                });
            }

            // Producer: one task per repository, then close the queue.
            for repository in repositories {
                let task = CloneTask {
                    destination: root.join(repository.short_name()),
                    repository: repository.clone(),
                };
                if sender.send(task).is_err() {
                    break;
                }
            }
            drop(sender);
        });

        let failures = failures.into_inner().map_err(|_| Error::Path {
            message: "clone worker state lock poisoned".to_string(),
        })?;

        self.report(failures)
    }

    /// Run one task and record its outcome.
    fn process(
        &self,
        runner: &dyn CloneRunner,
        task: CloneTask,
        abort: &AtomicBool,
        failures: &Mutex<Vec<(String, Error)>>,
    ) {
        let url = task.repository.clone_url();
        match runner.clone_repository(url, &task.destination) {
            Ok(()) => {
                println!("{} Cloned {}", self.output.emoji("✅", "[OK]"), url);
            }
            Err(e) => {
                abort.store(true, Ordering::Relaxed);
                if let Ok(mut failures) = failures.lock() {
                    failures.push((url.to_string(), e));
                }
            }
        }
    }

    fn report(&self, failures: Vec<(String, Error)>) -> Result<()> {
        if failures.is_empty() {
            return Ok(());
        }
        match self.failure_mode {
            FailureMode::FailFast => {
                // First failure in completion order; the rest were either
                // never attempted or are duplicates of the same abort.
                let (_, error) = failures
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::Path {
                        message: "failure list drained unexpectedly".to_string(),
                    })?;
                Err(error)
            }
            FailureMode::KeepGoing => Err(Error::CloneFailures {
                failures: failures
                    .into_iter()
                    .map(|(url, error)| (url, error.to_string()))
                    .collect(),
            }),
        }
    }
}
