/*!
 * Partition Simulator Library
 * Dynamic-partition memory allocation with first-fit, best-fit and worst-fit placement
 */

pub mod config;
pub mod core;
pub mod memory;
pub mod monitoring;
pub mod simulation;

// Re-exports
pub use config::{ConfigError, ReportFormat, SimulatorConfig};
pub use crate::core::types::{Address, Pid, Size};
pub use memory::{
    Allocator, FitStrategy, MemoryError, MemoryInfo, MemoryResult, MemoryStats, Partition,
    PartitionManager, PartitionStatus,
};
pub use monitoring::init_tracing;
pub use simulation::{load_requests, parse_requests, Request, Simulation, Workload};
