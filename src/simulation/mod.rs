/*!
 * Simulation Module
 * Request loading, request driving and reporting around the partition allocator
 */

pub mod driver;
pub mod report;
pub mod request;

pub use driver::{
    execute, RejectReason, RejectionCounts, RequestOutcome, Simulation, SimulationSummary,
};
pub use report::{render_json, render_memory_map, render_outcome, render_stats, render_summary};
pub use request::{load_requests, parse_requests, LoadError, Operation, Request, Workload};
