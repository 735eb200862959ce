/*!
 * Reporting
 * Read-only rendering of partition tables, request outcomes and summaries
 */

use super::driver::{RequestOutcome, Simulation, SimulationSummary};
use crate::memory::{MemoryInfo, MemoryStats, Partition};
use comfy_table::Table;
use serde::Serialize;
use std::fmt::Write;

/// Allocated and free partition tables followed by statistics
pub fn render_memory_map(memory: &impl MemoryInfo) -> String {
    let partitions = memory.partitions();
    let stats = memory.stats();
    let mut out = String::new();

    let _ = writeln!(out, "=== Memory Map ===");
    let _ = writeln!(out, "Total size: {}", stats.total_size);

    let _ = writeln!(out, "\n--- Allocated partitions ---");
    let allocated: Vec<&Partition> = partitions.iter().filter(|p| !p.is_free()).collect();
    if allocated.is_empty() {
        let _ = writeln!(out, "No allocated partitions");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Start", "Size", "Process"]);
        for partition in allocated {
            table.add_row(vec![
                format_address(partition.start),
                partition.size.to_string(),
                partition
                    .owner
                    .map(|pid| pid.to_string())
                    .unwrap_or_default(),
            ]);
        }
        let _ = writeln!(out, "{}", table);
    }

    let _ = writeln!(out, "\n--- Free partitions ---");
    let free: Vec<&Partition> = partitions.iter().filter(|p| p.is_free()).collect();
    if free.is_empty() {
        let _ = writeln!(out, "No free partitions");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Start", "Size"]);
        for partition in free {
            table.add_row(vec![format_address(partition.start), partition.size.to_string()]);
        }
        let _ = writeln!(out, "{}", table);
    }

    out.push_str(&render_stats(&stats));
    out
}

/// Statistics block
pub fn render_stats(stats: &MemoryStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n--- Statistics ---");
    let _ = writeln!(out, "Utilization: {:.2}%", stats.usage_percentage());
    let _ = writeln!(
        out,
        "Allocated: {} units in {} partition(s)",
        stats.allocated_size, stats.allocated_count
    );
    let _ = writeln!(
        out,
        "Free: {} units in {} partition(s), largest {}",
        stats.free_size, stats.free_count, stats.largest_free
    );
    let _ = writeln!(
        out,
        "External fragmentation: {:.2}%",
        stats.external_fragmentation * 100.0
    );
    let _ = writeln!(out, "Pressure: {}", stats.memory_pressure());
    out
}

/// One line describing a processed request
pub fn render_outcome(outcome: &RequestOutcome) -> String {
    let request = &outcome.request;
    match (outcome.accepted, outcome.reason) {
        (true, _) => match (outcome.address, outcome.released) {
            (Some(address), _) => format!(
                "[{}] {}: accepted at {}",
                outcome.index + 1,
                request,
                format_address(address)
            ),
            (_, Some(released)) => format!(
                "[{}] {}: accepted, {} units released",
                outcome.index + 1,
                request,
                released
            ),
            _ => format!("[{}] {}: accepted", outcome.index + 1, request),
        },
        (false, Some(reason)) => {
            format!("[{}] {}: rejected ({})", outcome.index + 1, request, reason)
        }
        (false, None) => format!("[{}] {}: rejected", outcome.index + 1, request),
    }
}

/// Final summary block
pub fn render_summary(summary: &SimulationSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Simulation complete ===");
    let _ = writeln!(out, "Run: {}", summary.run_id);
    let _ = writeln!(out, "Strategy: {}", summary.strategy);
    let _ = writeln!(
        out,
        "Requests: {} processed of {}",
        summary.processed, summary.total_requests
    );
    let _ = writeln!(out, "Accepted: {}", summary.accepted);
    let _ = writeln!(
        out,
        "Rejected: {} (no fit {}, not found {}, invalid size {})",
        summary.rejected.total(),
        summary.rejected.no_fit,
        summary.rejected.not_found,
        summary.rejected.invalid_size
    );
    out
}

/// Serializable view of a finished or in-progress run
#[derive(Debug, Serialize)]
pub struct SimulationReport<'a> {
    pub summary: SimulationSummary,
    pub outcomes: &'a [RequestOutcome],
    pub partitions: &'a [Partition],
}

impl<'a> SimulationReport<'a> {
    pub fn new(simulation: &'a Simulation) -> Self {
        Self {
            summary: simulation.summary(),
            outcomes: simulation.outcomes(),
            partitions: simulation.manager().partitions(),
        }
    }
}

/// Pretty JSON document describing the run
pub fn render_json(simulation: &Simulation) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SimulationReport::new(simulation))
}

fn format_address(address: usize) -> String {
    format!("0x{:08x}", address)
}
