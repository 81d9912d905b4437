// pharos_core/src/planner.rs

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Position, Velocity};

/// Distances below this count as "at the goal" and produce a zero command.
pub const GOAL_EPSILON: f64 = 1e-6;

/// How the commanded speed varies with the remaining distance to the goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
#[serde(rename_all = "PascalCase")]
pub enum SpeedProfile {
    /// Fixed cruise speed regardless of distance.
    Constant { cruise_speed: f64 },
    /// A Gaussian bump centered `mu` away from the goal, on top of a floor of
    /// half the speed limit: max_speed * exp(-(d - mu)^2 / (2 sigma^2))
    /// + max_speed / 2. The agent surges mid-route and never stalls far out.
    Gaussian { mu: f64, sigma: f64 },
}

/// Straight-line pursuit of a fixed goal.
///
/// Stateless between calls: every command is recomputed from the latest
/// estimate, so upstream filtering or collision repair needs no coordination
/// with the planner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoToGoalPlanner {
    pub goal: Position,
    /// Hard speed limit applied after the profile.
    pub max_speed: f64,
    /// Timestep the commands will be integrated over.
    pub dt: f64,
    pub profile: SpeedProfile,
}

impl GoToGoalPlanner {
    pub fn new(
        goal: Position,
        max_speed: f64,
        dt: f64,
        profile: SpeedProfile,
    ) -> Result<Self, ConfigError> {
        if max_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(max_speed));
        }
        if dt <= 0.0 {
            return Err(ConfigError::NonPositiveTimestep(dt));
        }
        match profile {
            SpeedProfile::Constant { cruise_speed } if cruise_speed <= 0.0 => {
                return Err(ConfigError::NonPositiveProfileParam {
                    name: "cruise_speed",
                    value: cruise_speed,
                });
            }
            SpeedProfile::Gaussian { sigma, .. } if sigma <= 0.0 => {
                return Err(ConfigError::NonPositiveProfileParam {
                    name: "sigma",
                    value: sigma,
                });
            }
            _ => {}
        }
        Ok(Self {
            goal,
            max_speed,
            dt,
            profile,
        })
    }

    /// Commanded velocity for an agent believed to be at `estimate`.
    ///
    /// The speed is clamped twice: by the hard limit, and by `dist / dt` so
    /// the final step lands on the goal instead of orbiting it.
    pub fn velocity_vector(&self, estimate: Position) -> Velocity {
        let direction = self.goal - estimate;
        let dist = direction.norm();
        if dist < GOAL_EPSILON {
            return Velocity::zeros();
        }

        let speed = self.profile_speed(dist).min(self.max_speed).min(dist / self.dt);
        direction * (speed / dist)
    }

    fn profile_speed(&self, dist: f64) -> f64 {
        match self.profile {
            SpeedProfile::Constant { cruise_speed } => cruise_speed,
            SpeedProfile::Gaussian { mu, sigma } => {
                let offset = dist - mu;
                self.max_speed * (-(offset * offset) / (2.0 * sigma * sigma)).exp()
                    + self.max_speed / 2.0
            }
        }
    }
}
