// pharos_sim/src/runner.rs

use pharos_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::debug;

use crate::config::ScenarioConfig;
use crate::error::Result;
use crate::sensors::{MotionNoise, PositionSensor};

/// One sense-estimate-plan-act cycle, as recorded for the report.
///
/// `measured`, `estimate` and `predicted` describe the position at the start
/// of the cycle; `true_position` is where the agent ended up after acting on
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickRecord {
    pub step: u32,
    pub true_position: [f64; 2],
    pub measured: [f64; 2],
    pub estimate: [f64; 2],
    pub predicted: [f64; 2],
    /// Speed actually flown this cycle, disturbance included.
    pub speed: f64,
    /// Running total of constraint interventions up to this cycle.
    pub collision_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    GoalReached,
    StepLimit,
}

/// Everything a single trial produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialReport {
    pub seed: u64,
    pub stop_reason: StopReason,
    pub steps: u32,
    pub final_position: [f64; 2],
    pub distance_to_goal: f64,
    pub collision_count: u32,
    /// Root-mean-square error of the estimate against ground truth.
    pub rmse: f64,
    pub ticks: Vec<TickRecord>,
}

/// Runs one trial to the goal or the step limit.
///
/// All randomness comes from a `ChaCha8Rng` seeded with `seed`, so a trial is
/// a pure function of its scenario and seed.
///
/// Arrival is judged on the committed true position after each step, not on
/// the estimate: a cycle's estimate describes the position before that
/// cycle's motion, so checking it would detect arrival one tick late. The
/// per-tick records keep every estimate, so a belief-based criterion can
/// still be applied to a finished report.
pub fn run_trial(config: &ScenarioConfig, seed: u64) -> Result<TrialReport> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let planner = config.build_planner()?;
    let mut agent = config.build_agent()?;
    let mut estimator = config.build_estimator()?;
    let sensor = PositionSensor::new(config.agent.sensor.noise_stddev)?;
    let actuation = MotionNoise::new(config.agent.actuation.noise_stddev, config.agent.max_speed)?;

    let goal = config.agent.goal_position();
    let dt = config.agent.dt;
    let max_steps = config.simulation.max_steps;

    let mut ticks = Vec::with_capacity(max_steps as usize);
    let mut sq_error_sum = 0.0;
    // Command applied over the previous cycle, fed back to the estimator.
    let mut commanded = Velocity::zeros();
    let mut stop_reason = StopReason::StepLimit;
    let mut steps = max_steps;

    for step in 1..=max_steps {
        let truth = agent.position();
        let measured = sensor.sense(truth, &mut rng);

        let (estimate, predicted) = match estimator.as_mut() {
            Some(filter) => {
                let out = filter.update(measured, commanded, dt)?;
                (out.estimate, out.predicted)
            }
            // No filter configured: plan straight off the raw measurement.
            None => (measured, measured),
        };
        sq_error_sum += (estimate - truth).norm_squared();

        commanded = planner.velocity_vector(estimate);
        let applied = actuation.apply(commanded, &mut rng);
        let (position, speed) = agent.step(applied);

        ticks.push(TickRecord {
            step,
            true_position: [position.x, position.y],
            measured: [measured.x, measured.y],
            estimate: [estimate.x, estimate.y],
            predicted: [predicted.x, predicted.y],
            speed,
            collision_count: agent.collision_count(),
        });

        if (position - goal).norm() <= config.simulation.goal_tolerance {
            stop_reason = StopReason::GoalReached;
            steps = step;
            break;
        }
    }

    let final_position = agent.position();
    let distance_to_goal = (final_position - goal).norm();
    let rmse = if ticks.is_empty() {
        0.0
    } else {
        (sq_error_sum / ticks.len() as f64).sqrt()
    };
    debug!(
        seed,
        steps,
        ?stop_reason,
        distance_to_goal,
        collisions = agent.collision_count(),
        "trial complete"
    );

    Ok(TrialReport {
        seed,
        stop_reason,
        steps,
        final_position: [final_position.x, final_position.y],
        distance_to_goal,
        collision_count: agent.collision_count(),
        rmse,
        ticks,
    })
}
