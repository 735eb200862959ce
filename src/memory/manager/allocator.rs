/*!
 * Partition Allocation
 * Candidate selection and block splitting
 */

use super::PartitionManager;
use crate::memory::strategy::FitStrategy;
use crate::memory::types::{MemoryError, MemoryPressure, MemoryResult, Partition};
use crate::core::types::{Address, Pid, Size};
use tracing::{debug, info, warn};

impl PartitionManager {
    /// Allocate `size` units for `pid` in the free partition chosen by `strategy`.
    ///
    /// On success the partition list grows by at most one element. On failure
    /// the list is untouched. A process that already owns a partition may
    /// allocate again and will then own several.
    pub fn allocate(&mut self, strategy: FitStrategy, size: Size, pid: Pid) -> MemoryResult<Address> {
        if size == 0 {
            warn!(pid, strategy = strategy.name(), "Rejected zero-size allocation");
            return Err(MemoryError::InvalidSize { requested: size });
        }

        let Some(idx) = strategy.select(&self.partitions, size) else {
            let (largest_free, free_total) = self.free_extent();
            warn!(
                pid,
                requested = size,
                largest_free,
                free_total,
                strategy = strategy.name(),
                "No free partition fits request"
            );
            return Err(MemoryError::NoFit {
                requested: size,
                largest_free,
                free_total,
            });
        };

        let address = self.split_and_assign(idx, size, pid);

        self.ledger.record_allocation(pid, size);

        debug_assert!(
            self.verify().is_ok(),
            "partition list corrupted after allocation: {:?}",
            self.verify()
        );

        let utilization = self.allocated_size() as f64 / self.total_size as f64;
        match MemoryPressure::from_utilization(utilization) {
            level @ (MemoryPressure::High | MemoryPressure::Critical) => warn!(
                pid,
                size,
                address,
                pressure = %level,
                "Memory pressure {}: {:.1}% of the address space allocated",
                level,
                utilization * 100.0
            ),
            _ => info!(
                pid,
                size,
                address,
                strategy = strategy.name(),
                "Allocated {} units at 0x{:x}",
                size,
                address
            ),
        }

        Ok(address)
    }

    /// Turn the free partition at `idx` into an allocated prefix of `size` units,
    /// inserting the remainder as a new free partition right after it.
    fn split_and_assign(&mut self, idx: usize, size: Size, pid: Pid) -> Address {
        let partition = &mut self.partitions[idx];
        let start = partition.start;
        let remainder = partition.size - size;

        partition.size = size;
        partition.assign(pid);

        if remainder > 0 {
            self.partitions
                .insert(idx + 1, Partition::free(start + size, remainder));
            debug!(
                kept = size,
                remainder,
                remainder_start = start + size,
                "Split free partition"
            );
        }

        start
    }
}
