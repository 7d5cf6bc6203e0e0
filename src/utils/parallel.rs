//! Runtime switch for the optional rayon fan-out over contract batches.
//!
//! Without the `parallel` feature every helper reports sequential execution
//! and the guard is a no-op.

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "parallel")]
static PARALLEL_ENABLED: AtomicBool = AtomicBool::new(true);

/// ABI and source bytes one rayon task should decode before yielding.
const TARGET_TASK_BYTES: usize = 64 * 1024;

/// Most contracts handed to one rayon task.
const MAX_CHUNK_SIZE: usize = 16;

/// Contracts per rayon task for a batch of `total_items` contracts carrying
/// `total_bytes` of ABI and source text; never zero.
///
/// Scanning cost is dominated by JSON decoding, which is linear in the text
/// length. Small contracts are grouped until a task holds roughly
/// [`TARGET_TASK_BYTES`]; contracts at least that large get a task each.
pub fn preferred_chunk_size(total_items: usize, total_bytes: usize) -> usize {
    if total_items == 0 {
        return 1;
    }
    let average = (total_bytes / total_items).max(1);
    (TARGET_TASK_BYTES / average).clamp(1, MAX_CHUNK_SIZE.min(total_items))
}

/// Returns `true` when batch scans may run on the rayon pool.
#[cfg(feature = "parallel")]
pub fn parallelism_enabled() -> bool {
    PARALLEL_ENABLED.load(Ordering::SeqCst)
}

/// Returns `true` when batch scans may run on the rayon pool.
#[cfg(not(feature = "parallel"))]
pub fn parallelism_enabled() -> bool {
    false
}

/// Enables or disables parallel batch scans until the guard is dropped.
#[cfg(feature = "parallel")]
pub fn set_parallelism(enabled: bool) -> ParallelismGuard {
    let previous = PARALLEL_ENABLED.swap(enabled, Ordering::SeqCst);
    ParallelismGuard { previous }
}

/// Enables or disables parallel batch scans until the guard is dropped.
#[cfg(not(feature = "parallel"))]
pub fn set_parallelism(_enabled: bool) -> ParallelismGuard {
    ParallelismGuard {}
}

/// Restores the previous parallelism setting on drop.
pub struct ParallelismGuard {
    #[cfg(feature = "parallel")]
    previous: bool,
}

#[cfg(feature = "parallel")]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {
        PARALLEL_ENABLED.store(self.previous, Ordering::SeqCst);
    }
}

#[cfg(not(feature = "parallel"))]
impl Drop for ParallelismGuard {
    fn drop(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_is_never_zero() {
        assert_eq!(preferred_chunk_size(0, 0), 1);
        assert_eq!(preferred_chunk_size(3, 0), 3);
        assert_eq!(preferred_chunk_size(10, 10 * TARGET_TASK_BYTES * 4), 1);
    }

    #[test]
    fn chunk_size_follows_contract_size() {
        // 4 KiB contracts: sixteen fit in one task.
        assert_eq!(preferred_chunk_size(1000, 1000 * 4096), MAX_CHUNK_SIZE);
        // 16 KiB contracts: four per task.
        assert_eq!(preferred_chunk_size(1000, 1000 * 16 * 1024), 4);
        // 40 KiB contracts: one per task.
        assert_eq!(preferred_chunk_size(1000, 1000 * 40 * 1024), 1);
    }

    #[test]
    fn guard_restores_previous_setting() {
        let before = parallelism_enabled();
        {
            let _guard = set_parallelism(false);
            assert!(!parallelism_enabled());
        }
        assert_eq!(parallelism_enabled(), before);
    }
}
