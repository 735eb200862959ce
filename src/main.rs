/*!
 * Partition Simulator - Main Entry Point
 *
 * Loads a request file, replays it through the selected placement strategy
 * and prints the memory map after every request.
 */

use miette::IntoDiagnostic;
use partition_sim::simulation::{render_json, render_memory_map, render_outcome, render_summary};
use partition_sim::{init_tracing, load_requests, ReportFormat, Simulation, SimulatorConfig};
use tracing::info;

fn main() -> miette::Result<()> {
    init_tracing();

    let config = SimulatorConfig::from_env()?.with_args(std::env::args().skip(1))?;
    info!(
        request_file = %config.request_file.display(),
        strategy = config.strategy.name(),
        "Partition simulator starting"
    );

    let workload = load_requests(&config.request_file)?;
    let mut simulation = Simulation::new(workload, config.strategy)?;
    let table = config.report == ReportFormat::Table;

    if table {
        println!("=== Partition Simulator ===");
        println!("Total size: {}", simulation.manager().total_size());
        println!("Strategy: {}", config.strategy);
        println!();
    }

    while let Some(outcome) = simulation.step() {
        let line = render_outcome(outcome?);
        if table {
            println!("{}", line);
            if !config.quiet {
                println!("{}", render_memory_map(simulation.manager()));
            }
        }
    }

    match config.report {
        ReportFormat::Table => {
            println!("{}", render_summary(&simulation.summary()));
            println!("{}", render_memory_map(simulation.manager()));
        }
        ReportFormat::Json => {
            println!("{}", render_json(&simulation).into_diagnostic()?);
        }
    }

    Ok(())
}
