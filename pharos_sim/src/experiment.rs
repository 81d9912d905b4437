// pharos_sim/src/experiment.rs

use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use crate::config::ScenarioConfig;
use crate::error::Result;
use crate::runner::{self, StopReason, TrialReport};

/// A full batch of trials against one scenario, plus aggregate statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentReport {
    pub scenario: String,
    /// Seed of trial 0; trial i runs with `base_seed + i` (wrapping).
    pub base_seed: u64,
    pub summary: Summary,
    pub trials: Vec<TrialReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub runs: u32,
    pub goal_reached: u32,
    pub mean_steps: f64,
    pub mean_rmse: f64,
    pub mean_collisions: f64,
    pub mean_distance_to_goal: f64,
}

impl Summary {
    fn from_trials(trials: &[TrialReport]) -> Self {
        let runs = trials.len() as u32;
        if trials.is_empty() {
            return Self {
                runs,
                goal_reached: 0,
                mean_steps: 0.0,
                mean_rmse: 0.0,
                mean_collisions: 0.0,
                mean_distance_to_goal: 0.0,
            };
        }

        let n = trials.len() as f64;
        Self {
            runs,
            goal_reached: trials
                .iter()
                .filter(|t| t.stop_reason == StopReason::GoalReached)
                .count() as u32,
            mean_steps: trials.iter().map(|t| f64::from(t.steps)).sum::<f64>() / n,
            mean_rmse: trials.iter().map(|t| t.rmse).sum::<f64>() / n,
            mean_collisions: trials
                .iter()
                .map(|t| f64::from(t.collision_count))
                .sum::<f64>()
                / n,
            mean_distance_to_goal: trials.iter().map(|t| t.distance_to_goal).sum::<f64>() / n,
        }
    }
}

/// Runs every trial the scenario asks for.
///
/// With a configured seed the whole experiment is reproducible; without one,
/// a base seed is drawn from the OS and logged so the batch can be replayed.
pub fn run(config: &ScenarioConfig, scenario: &Path) -> Result<ExperimentReport> {
    let base_seed = match config.simulation.seed {
        Some(seed) => seed,
        None => {
            let seed = OsRng.next_u64();
            info!(seed, "no seed configured, drew one from the OS");
            seed
        }
    };

    let mut trials = Vec::with_capacity(config.simulation.runs as usize);
    for i in 0..config.simulation.runs {
        let seed = base_seed.wrapping_add(u64::from(i));
        let trial = runner::run_trial(config, seed)?;
        info!(
            trial = i,
            seed,
            steps = trial.steps,
            stop = ?trial.stop_reason,
            collisions = trial.collision_count,
            rmse = trial.rmse,
            "trial finished"
        );
        trials.push(trial);
    }

    let summary = Summary::from_trials(&trials);
    info!(
        runs = summary.runs,
        goal_reached = summary.goal_reached,
        mean_steps = summary.mean_steps,
        mean_rmse = summary.mean_rmse,
        mean_collisions = summary.mean_collisions,
        "experiment finished"
    );

    Ok(ExperimentReport {
        scenario: scenario.display().to_string(),
        base_seed,
        summary,
        trials,
    })
}

/// Writes the full report, per-tick traces included, as pretty JSON.
pub fn write_json(report: &ExperimentReport, path: &Path) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}
