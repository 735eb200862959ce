/*!
 * Partition Release
 * Freeing and coalescing with adjacent free partitions
 */

use super::PartitionManager;
use crate::core::types::{Pid, Size};
use crate::memory::types::{MemoryError, MemoryResult};
use tracing::{debug, info, warn};

impl PartitionManager {
    /// Free every partition owned by `pid`, merging each with free neighbours.
    ///
    /// Returns the number of units released. Fails with `NotFound` and leaves
    /// the list untouched when `pid` owns nothing.
    pub fn release(&mut self, pid: Pid) -> MemoryResult<Size> {
        if !self.partitions.iter().any(|p| p.is_owned_by(pid)) {
            warn!(pid, "Release requested for process without allocated partitions");
            return Err(MemoryError::NotFound(pid));
        }

        let mut released = 0;
        let mut freed_count = 0;
        let mut idx = 0;

        while idx < self.partitions.len() {
            if self.partitions[idx].is_owned_by(pid) {
                released += self.partitions[idx].size;
                freed_count += 1;
                self.partitions[idx].release();
                idx = self.coalesce_at(idx);
            }
            idx += 1;
        }

        self.ledger.record_release(pid, released);

        debug_assert!(
            self.verify().is_ok(),
            "partition list corrupted after release: {:?}",
            self.verify()
        );

        info!(
            pid,
            released,
            partitions = freed_count,
            free_total = self.total_size - self.allocated_size(),
            "Released {} units in {} partition(s)",
            released,
            freed_count
        );

        Ok(released)
    }

    /// Merge the free partition at `idx` with every free partition directly
    /// before or after it. Returns the index of the merged partition.
    fn coalesce_at(&mut self, mut idx: usize) -> usize {
        let mut merged = 0;

        while idx + 1 < self.partitions.len() && self.partitions[idx + 1].is_free() {
            let next = self.partitions.remove(idx + 1);
            self.partitions[idx].size += next.size;
            merged += 1;
        }

        while idx > 0 && self.partitions[idx - 1].is_free() {
            let current = self.partitions.remove(idx);
            idx -= 1;
            self.partitions[idx].size += current.size;
            merged += 1;
        }

        if merged > 0 {
            let partition = &self.partitions[idx];
            debug!(
                start = partition.start,
                size = partition.size,
                merged,
                "Coalesced adjacent free partitions"
            );
        }

        idx
    }
}
