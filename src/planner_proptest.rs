//! Property-based tests for the worker-pool sizing policy.
//!
//! These tests use proptest to generate random batch sizes and verify that
//! the sizing invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::planner::worker_count;
    use proptest::prelude::*;

    proptest! {
        /// Property: the pool never exceeds the fixed ceiling
        #[test]
        fn worker_count_never_exceeds_ceiling(task_count in 0usize..1_000_000) {
            prop_assert!(worker_count(task_count) <= 50);
        }

        /// Property: small batches get exactly half as many workers as tasks
        #[test]
        fn worker_count_is_half_for_small_batches(task_count in 0usize..=100) {
            prop_assert_eq!(worker_count(task_count), task_count / 2);
        }

        /// Property: everything above the small-batch limit pins the ceiling
        #[test]
        fn worker_count_pins_ceiling_for_large_batches(task_count in 101usize..1_000_000) {
            prop_assert_eq!(worker_count(task_count), 50);
        }

        /// Property: the pool never outnumbers the tasks it serves
        #[test]
        fn worker_count_never_outnumbers_tasks(task_count in 0usize..1_000_000) {
            prop_assert!(worker_count(task_count) <= task_count.max(1));
        }
    }
}
