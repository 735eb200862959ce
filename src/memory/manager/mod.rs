/*!
 * Partition Manager
 *
 * Dynamic-partition allocator over an abstract address space `[0, total_size)`.
 *
 * ## Layout
 *
 * The address space is an ordered `Vec<Partition>` sorted by start address:
 * - Partitions abut with no gaps or overlaps and cover the whole space
 * - Allocation splits a free partition into an allocated prefix and a free
 *   remainder (`Vec::insert`), omitting the remainder on an exact fit
 * - Release frees the partition and merges it with free neighbours on both
 *   sides (`Vec::remove`), so no two free partitions are ever adjacent
 *
 * ## Placement
 *
 * [`FitStrategy`] selects the free partition: first-fit, best-fit or
 * worst-fit, all scanning in ascending address order.
 *
 * ## Tracking
 *
 * Per-process current and peak usage plus allocation counts are kept for
 * reporting. They never influence placement.
 */

mod allocator;
mod inspect;
mod release;
mod tracking;
mod verify;

use super::strategy::FitStrategy;
use super::traits::{Allocator, MemoryInfo};
use super::types::{MemoryError, MemoryResult, MemoryStats, Partition};
use crate::core::types::{Address, Pid, Size};
use tracing::info;
use tracking::ProcessLedger;

/// Partition allocator state
#[derive(Debug, Clone)]
pub struct PartitionManager {
    partitions: Vec<Partition>,
    total_size: Size,
    ledger: ProcessLedger,
}

impl PartitionManager {
    /// Create a manager whose address space is one free partition of `total_size` units
    pub fn new(total_size: Size) -> MemoryResult<Self> {
        let mut manager = Self {
            partitions: Vec::new(),
            total_size: 0,
            ledger: ProcessLedger::default(),
        };
        manager.initialize(total_size)?;
        Ok(manager)
    }

    /// Hard reset to a single free partition spanning `total_size` units.
    /// All prior partitions and tracking are discarded.
    pub fn initialize(&mut self, total_size: Size) -> MemoryResult<()> {
        if total_size == 0 {
            return Err(MemoryError::InvalidCapacity(total_size));
        }

        self.partitions.clear();
        self.partitions.push(Partition::free(0, total_size));
        self.total_size = total_size;
        self.ledger.clear();

        info!(total_size, "Partition manager initialized");
        Ok(())
    }

    pub fn total_size(&self) -> Size {
        self.total_size
    }

    /// All partitions in ascending address order
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }
}

// Implement trait interfaces
impl Allocator for PartitionManager {
    fn allocate(&mut self, strategy: FitStrategy, size: Size, pid: Pid) -> MemoryResult<Address> {
        PartitionManager::allocate(self, strategy, size, pid)
    }

    fn release(&mut self, pid: Pid) -> MemoryResult<Size> {
        PartitionManager::release(self, pid)
    }

    fn initialize(&mut self, total_size: Size) -> MemoryResult<()> {
        PartitionManager::initialize(self, total_size)
    }
}

impl MemoryInfo for PartitionManager {
    fn partitions(&self) -> &[Partition] {
        PartitionManager::partitions(self)
    }

    fn stats(&self) -> MemoryStats {
        PartitionManager::stats(self)
    }

    fn process_memory(&self, pid: Pid) -> Size {
        PartitionManager::process_memory(self, pid)
    }
}
