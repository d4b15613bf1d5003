//! # Worker-Pool Sizing Policy
//!
//! Decides how many clone workers run concurrently for a given batch size.
//! The policy bounds concurrent outbound `git clone` processes so a large
//! account cannot overwhelm the host's process and network limits, while
//! small batches avoid over-provisioning idle workers.

/// Fixed ceiling on concurrently running clone workers.
const WORKER_CEILING: usize = 50;

/// Batches at or below this size get half as many workers as tasks.
const SMALL_BATCH_LIMIT: usize = 100;

/// Number of workers for `task_count` clone tasks.
///
/// `task_count / 2` for small batches, capped at [`WORKER_CEILING`] no
/// matter how large the batch grows. Total over all inputs; no side effects.
///
/// Note that `worker_count(1) == 0`: the raw policy can return zero for a
/// non-empty batch. The orchestrator clamps its pool to at least one worker
/// whenever there is work to do, so the policy stays an exact statement of
/// the sizing curve.
pub fn worker_count(task_count: usize) -> usize {
    if task_count <= SMALL_BATCH_LIMIT {
        task_count / 2
    } else {
        WORKER_CEILING
    }
}
