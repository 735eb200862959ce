/*!
 * Partition Inspection
 * Statistics and per-process queries for reporting
 */

use super::PartitionManager;
use crate::core::types::{Pid, Size};
use crate::memory::types::{MemoryStats, Partition, ProcessMemoryStats};

impl PartitionManager {
    /// Get overall memory statistics
    pub fn stats(&self) -> MemoryStats {
        let mut allocated_size = 0;
        let mut allocated_count = 0;
        let mut free_size = 0;
        let mut free_count = 0;
        let mut largest_free = 0;

        for partition in &self.partitions {
            if partition.is_free() {
                free_size += partition.size;
                free_count += 1;
                largest_free = largest_free.max(partition.size);
            } else {
                allocated_size += partition.size;
                allocated_count += 1;
            }
        }

        let external_fragmentation = if free_size == 0 {
            0.0
        } else {
            1.0 - largest_free as f64 / free_size as f64
        };

        MemoryStats {
            total_size: self.total_size,
            allocated_size,
            free_size,
            allocated_count,
            free_count,
            largest_free,
            utilization: allocated_size as f64 / self.total_size as f64,
            external_fragmentation,
        }
    }

    /// Units held by allocated partitions
    pub fn allocated_size(&self) -> Size {
        self.partitions
            .iter()
            .filter(|p| !p.is_free())
            .map(|p| p.size)
            .sum()
    }

    /// Largest free partition and total free units
    pub(super) fn free_extent(&self) -> (Size, Size) {
        self.partitions
            .iter()
            .filter(|p| p.is_free())
            .fold((0, 0), |(largest, total), p| {
                (largest.max(p.size), total + p.size)
            })
    }

    /// Partitions currently owned by a process, in address order
    pub fn process_allocations(&self, pid: Pid) -> Vec<Partition> {
        self.partitions
            .iter()
            .filter(|p| p.is_owned_by(pid))
            .cloned()
            .collect()
    }

    /// Units currently owned by a process
    pub fn process_memory(&self, pid: Pid) -> Size {
        self.partitions
            .iter()
            .filter(|p| p.is_owned_by(pid))
            .map(|p| p.size)
            .sum()
    }

    /// Usage history for a process that has allocated at least once since
    /// the last initialization
    pub fn process_stats(&self, pid: Pid) -> Option<ProcessMemoryStats> {
        self.ledger.stats(pid)
    }
}
