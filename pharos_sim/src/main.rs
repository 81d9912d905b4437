// pharos_sim/src/main.rs

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pharos_sim::cli::Cli;
use pharos_sim::config::ScenarioConfig;
use pharos_sim::error::Result;
use pharos_sim::experiment;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pharos_sim=info,pharos_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    info!(scenario = %cli.scenario.display(), "loading scenario");

    let mut config = ScenarioConfig::load(&cli.scenario)?;
    if let Some(runs) = cli.runs {
        config.simulation.runs = runs;
    }
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }

    let report = experiment::run(&config, &cli.scenario)?;

    if let Some(path) = &cli.output {
        experiment::write_json(&report, path)?;
        info!(path = %path.display(), "wrote experiment report");
    }

    Ok(())
}
