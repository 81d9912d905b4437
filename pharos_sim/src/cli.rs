// pharos_sim/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

/// Pharos: a 2D point-agent navigation simulator.
///
/// Runs batches of sense-estimate-plan-act trials from a scenario TOML file
/// and reports goal arrival, estimation error and collision statistics.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/open_field.toml")]
    pub scenario: PathBuf,

    /// Override the number of Monte Carlo trials in the scenario.
    #[arg(long)]
    pub runs: Option<u32>,

    /// Override the scenario's base RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the full experiment report as JSON to this path.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
