/*!
 * Partition List Verification
 * Structural invariant checks
 */

use super::PartitionManager;
use crate::memory::types::{MemoryError, MemoryResult, PartitionStatus};

impl PartitionManager {
    /// Check that the partition list still describes the address space:
    /// contiguous coverage from 0 to `total_size`, no zero-size partitions,
    /// owners exactly on allocated partitions, and no adjacent free pair.
    pub fn verify(&self) -> MemoryResult<()> {
        let corrupt = |address, reason: String| MemoryError::CorruptionDetected { address, reason };

        let mut expected_start = 0;
        let mut previous_free = false;

        for partition in &self.partitions {
            if partition.start != expected_start {
                return Err(corrupt(
                    partition.start,
                    format!("expected partition to start at 0x{:x}", expected_start),
                ));
            }
            if partition.size == 0 {
                return Err(corrupt(partition.start, "zero-size partition".to_string()));
            }
            match (partition.status, partition.owner) {
                (PartitionStatus::Allocated, None) => {
                    return Err(corrupt(
                        partition.start,
                        "allocated partition without owner".to_string(),
                    ))
                }
                (PartitionStatus::Free, Some(pid)) => {
                    return Err(corrupt(
                        partition.start,
                        format!("free partition still owned by process {}", pid),
                    ))
                }
                _ => {}
            }
            if previous_free && partition.is_free() {
                return Err(corrupt(
                    partition.start,
                    "adjacent free partitions were not coalesced".to_string(),
                ));
            }

            previous_free = partition.is_free();
            expected_start = partition.end();
        }

        if expected_start != self.total_size {
            return Err(corrupt(
                expected_start,
                format!("partitions cover {} of {} units", expected_start, self.total_size),
            ));
        }

        Ok(())
    }
}
