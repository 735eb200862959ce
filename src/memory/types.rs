/*!
 * Memory Types
 * Partitions, statistics and errors for the partition allocator
 */

use crate::core::limits::{PRESSURE_CRITICAL_RATIO, PRESSURE_MEDIUM_RATIO, PRESSURE_WARNING_RATIO};
use crate::core::types::{Address, Pid, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Partition allocator errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Invalid allocation size: {requested} units")]
    #[diagnostic(
        code(memory::invalid_size),
        help("Allocation requests must ask for at least one unit.")
    )]
    InvalidSize { requested: Size },

    #[error("No free partition fits {requested} units (largest free {largest_free}, {free_total} free in total)")]
    #[diagnostic(
        code(memory::no_fit),
        help("Release partitions or pick a placement strategy that fragments less.")
    )]
    NoFit {
        requested: Size,
        largest_free: Size,
        free_total: Size,
    },

    #[error("Process {0} owns no allocated partition")]
    #[diagnostic(
        code(memory::not_found),
        help("The process may have been released already or never allocated.")
    )]
    NotFound(Pid),

    #[error("Invalid address space capacity: {0} units")]
    #[diagnostic(
        code(memory::invalid_capacity),
        help("The address space must contain at least one unit.")
    )]
    InvalidCapacity(Size),

    #[error("Partition list corruption detected at 0x{address:x}: {reason}")]
    #[diagnostic(code(memory::corruption))]
    CorruptionDetected { address: Address, reason: String },
}

/// Partition state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionStatus {
    Free,
    Allocated,
}

impl std::fmt::Display for PartitionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PartitionStatus::Free => write!(f, "FREE"),
            PartitionStatus::Allocated => write!(f, "ALLOCATED"),
        }
    }
}

/// A contiguous run of the address space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    pub start: Address,
    pub size: Size,
    pub status: PartitionStatus,
    pub owner: Option<Pid>,
}

impl Partition {
    pub fn free(start: Address, size: Size) -> Self {
        Self {
            start,
            size,
            status: PartitionStatus::Free,
            owner: None,
        }
    }

    pub fn allocated(start: Address, size: Size, owner: Pid) -> Self {
        Self {
            start,
            size,
            status: PartitionStatus::Allocated,
            owner: Some(owner),
        }
    }

    /// One past the last unit of this partition
    #[inline]
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.status == PartitionStatus::Free
    }

    #[inline]
    pub fn is_owned_by(&self, pid: Pid) -> bool {
        self.status == PartitionStatus::Allocated && self.owner == Some(pid)
    }

    pub(crate) fn assign(&mut self, pid: Pid) {
        self.status = PartitionStatus::Allocated;
        self.owner = Some(pid);
    }

    pub(crate) fn release(&mut self) {
        self.status = PartitionStatus::Free;
        self.owner = None;
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_size: Size,
    pub allocated_size: Size,
    pub free_size: Size,
    pub allocated_count: usize,
    pub free_count: usize,
    pub largest_free: Size,
    /// allocated / total, in [0, 1]
    pub utilization: f64,
    /// 1 - largest_free / free_size, 0 when nothing is free
    pub external_fragmentation: f64,
}

impl MemoryStats {
    pub fn usage_percentage(&self) -> f64 {
        self.utilization * 100.0
    }

    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_utilization(self.utilization)
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_utilization(ratio: f64) -> Self {
        if ratio >= PRESSURE_CRITICAL_RATIO {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_WARNING_RATIO {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM_RATIO {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Process memory statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMemoryStats {
    pub pid: Pid,
    pub allocated: Size,
    pub peak: Size,
    pub allocation_count: usize,
}
