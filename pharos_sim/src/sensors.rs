// pharos_sim/src/sensors.rs

use pharos_core::types::{Position, Velocity};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::Result;

/// Gaussian position sensor, the estimator's only window onto ground truth.
///
/// A standard deviation of zero is a perfect sensor; the distribution still
/// draws from the RNG, so swapping noise on and off does not change how many
/// samples a trial consumes.
pub struct PositionSensor {
    noise_dist: Normal<f64>,
}

impl PositionSensor {
    pub fn new(noise_stddev: f64) -> Result<Self> {
        Ok(Self {
            noise_dist: Normal::new(0.0, noise_stddev)?,
        })
    }

    /// True position plus independent per-axis noise.
    pub fn sense(&self, true_pos: Position, rng: &mut impl Rng) -> Position {
        Position::new(
            true_pos.x + self.noise_dist.sample(rng),
            true_pos.y + self.noise_dist.sample(rng),
        )
    }
}

/// Actuation disturbance applied to the commanded velocity before it is
/// integrated. The perturbed command is rescaled onto the speed limit if the
/// noise pushed it past, so the disturbance can slow the agent down but never
/// make it cheat the limit.
pub struct MotionNoise {
    noise_dist: Normal<f64>,
    max_speed: f64,
}

impl MotionNoise {
    pub fn new(noise_stddev: f64, max_speed: f64) -> Result<Self> {
        Ok(Self {
            noise_dist: Normal::new(0.0, noise_stddev)?,
            max_speed,
        })
    }

    pub fn apply(&self, commanded: Velocity, rng: &mut impl Rng) -> Velocity {
        let noisy = Velocity::new(
            commanded.x + self.noise_dist.sample(rng),
            commanded.y + self.noise_dist.sample(rng),
        );
        let speed = noisy.norm();
        if speed > self.max_speed {
            noisy * (self.max_speed / speed)
        } else {
            noisy
        }
    }
}
