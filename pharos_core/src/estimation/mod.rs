// pharos_core/src/estimation/mod.rs

use crate::error::EstimationError;
use crate::types::{Position, Velocity};

/// Variance assigned to every state component of a freshly built filter.
/// Loose enough that the first few measurements dominate the prior.
pub const INITIAL_COVARIANCE: f64 = 1.0;

/// The two position estimates produced by one filter cycle: where the motion
/// model placed the agent before the measurement arrived, and the fused
/// result afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateUpdate {
    /// Best estimate after fusing the measurement.
    pub estimate: Position,
    /// Model-only prediction, before the correction step.
    pub predicted: Position,
}

/// The contract for any algorithm that performs the position-estimator role.
///
/// Implementations own their full state (covariances, velocity components and
/// so on); callers only ever see positions.
pub trait PositionEstimator: Send + Sync {
    /// Runs one predict-correct cycle against a position measurement taken
    /// `dt` seconds after the previous cycle. `commanded` is the velocity the
    /// planner requested over that interval; models whose state already
    /// carries velocity are free to ignore it.
    fn update(
        &mut self,
        measured: Position,
        commanded: Velocity,
        dt: f64,
    ) -> Result<EstimateUpdate, EstimationError>;

    /// Current best position estimate.
    fn position(&self) -> Position;
}

mod constant_velocity;
mod scalar;

pub use constant_velocity::ConstantVelocityKalman;
pub use scalar::ScalarKalman;
