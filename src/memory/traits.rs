/*!
 * Memory Traits
 * Partition allocator abstractions
 */

use super::strategy::FitStrategy;
use super::types::*;
use crate::core::types::{Address, Pid, Size};

/// Partition allocator interface
pub trait Allocator {
    /// Place `size` units for `pid` using `strategy`, returning the partition start
    fn allocate(&mut self, strategy: FitStrategy, size: Size, pid: Pid) -> MemoryResult<Address>;

    /// Free every partition owned by `pid`, returning the number of units released
    fn release(&mut self, pid: Pid) -> MemoryResult<Size>;

    /// Reset to a single free partition of `total_size` units
    fn initialize(&mut self, total_size: Size) -> MemoryResult<()>;
}

/// Read-only inspection for reporting
pub trait MemoryInfo {
    /// All partitions in ascending address order
    fn partitions(&self) -> &[Partition];

    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Units currently owned by a process
    fn process_memory(&self, pid: Pid) -> Size;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
