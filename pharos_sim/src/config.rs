// pharos_sim/src/config.rs

use figment::{
    providers::{Format, Toml},
    Figment,
};
use pharos_core::prelude::*;
use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

// =========================================================================
// == Top-Level Scenario Configuration ==
// =========================================================================

/// The root of the data parsed from a `scenario.toml` file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use defaults if the [simulation] section is missing
    pub simulation: Simulation,

    pub agent: AgentConfig,

    #[serde(default)]
    pub world: World,
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in a scenario.toml file.
// =========================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Simulation {
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Number of Monte Carlo trials to run.
    #[serde(default = "default_runs")]
    pub runs: u32,
    /// Hard cap on sense-estimate-plan-act cycles per trial.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    /// A trial stops once the true position is this close to the goal.
    #[serde(default = "default_goal_tolerance")]
    pub goal_tolerance: f64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seed: None,
            runs: default_runs(),
            max_steps: default_max_steps(),
            goal_tolerance: default_goal_tolerance(),
        }
    }
}

fn default_runs() -> u32 {
    1
}

fn default_max_steps() -> u32 {
    1000
}

fn default_goal_tolerance() -> f64 {
    0.5
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Where the agent begins, [x, y] in meters.
    pub start: [f64; 2],
    /// Where the planner steers it, [x, y] in meters.
    pub goal: [f64; 2],
    /// Radius of the agent's bounding disk used by collision checks.
    #[serde(default)]
    pub radius: f64,
    /// Hard speed limit in meters per second.
    pub max_speed: f64,
    /// Timestep between cycles, in seconds.
    pub dt: f64,
    #[serde(default)]
    pub sensor: SensorConfig,
    #[serde(default)]
    pub actuation: ActuationConfig,
    /// Position filter; omit the section to plan on raw measurements.
    pub estimator: Option<EstimatorConfig>,
    pub planner: SpeedProfile,
}

impl AgentConfig {
    pub fn start_position(&self) -> Position {
        Position::new(self.start[0], self.start[1])
    }

    pub fn goal_position(&self) -> Position {
        Position::new(self.goal[0], self.goal[1])
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorConfig {
    /// Standard deviation of the position measurement noise, in meters.
    #[serde(default)]
    pub noise_stddev: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActuationConfig {
    /// Standard deviation of the velocity disturbance, in meters per second.
    #[serde(default)]
    pub noise_stddev: f64,
}

// The `tag = "kind"` tells Serde to look for a `kind = "..."` field in the
// TOML to decide which variant to parse.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "kind")]
#[serde(rename_all = "PascalCase")]
pub enum EstimatorConfig {
    ConstantVelocity {
        process_variance: f64,
        measurement_variance: f64,
    },
    Scalar {
        process_variance: f64,
        measurement_variance: f64,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct World {
    /// Outer rectangle of permitted space; omit for an unbounded world.
    pub boundary: Option<BoundaryConfig>,
    /// Rectangles of forbidden space, as `[[world.obstacles]]` tables.
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundaryConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

// =========================================================================
// == Loading and Wiring ==
// =========================================================================

impl ScenarioConfig {
    /// Loads and parses a scenario TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Figment::new().merge(Toml::file(path)).extract()?;
        Ok(config)
    }

    /// Parses a scenario from an in-memory TOML string.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config = Figment::new().merge(Toml::string(toml)).extract()?;
        Ok(config)
    }

    pub fn build_planner(&self) -> Result<GoToGoalPlanner> {
        let planner = GoToGoalPlanner::new(
            self.agent.goal_position(),
            self.agent.max_speed,
            self.agent.dt,
            self.agent.planner,
        )?;
        Ok(planner)
    }

    /// Builds the physical agent with whatever constraints the world section
    /// declares attached to it.
    pub fn build_agent(&self) -> Result<Agent> {
        // A world with neither boundary nor obstacles never reads the radius,
        // so reject a bad one here rather than letting it ride along silently.
        if self.agent.radius < 0.0 {
            return Err(ConfigError::NegativeRadius(self.agent.radius).into());
        }

        let mut agent = Agent::new(self.agent.start_position(), self.agent.dt)?;

        if let Some(bounds) = &self.world.boundary {
            let boundary = Boundary::new(
                bounds.x_min,
                bounds.x_max,
                bounds.y_min,
                bounds.y_max,
                self.agent.radius,
                self.agent.max_speed,
                self.agent.dt,
            )?;
            agent = agent.with_boundary(boundary);
        }

        if !self.world.obstacles.is_empty() {
            let mut field =
                ObstacleField::new(self.agent.radius, self.agent.max_speed, self.agent.dt)?;
            for &obstacle in &self.world.obstacles {
                field.add(obstacle)?;
            }
            agent = agent.with_obstacles(field);
        }

        Ok(agent)
    }

    /// Builds the configured position filter, if any.
    pub fn build_estimator(&self) -> Result<Option<Box<dyn PositionEstimator>>> {
        let start = self.agent.start_position();
        let filter: Box<dyn PositionEstimator> = match self.agent.estimator {
            None => return Ok(None),
            Some(EstimatorConfig::ConstantVelocity {
                process_variance,
                measurement_variance,
            }) => Box::new(ConstantVelocityKalman::new(
                start,
                process_variance,
                measurement_variance,
            )?),
            Some(EstimatorConfig::Scalar {
                process_variance,
                measurement_variance,
            }) => Box::new(ScalarKalman::new(
                start,
                process_variance,
                measurement_variance,
            )?),
        };
        Ok(Some(filter))
    }
}
