// pharos_core/src/error.rs

use thiserror::Error;

/// Rejected at construction time: a configuration that would later produce
/// NaN or garbage trajectories is refused up front.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid extents: x [{x_min}, {x_max}], y [{y_min}, {y_max}] (min must be below max)")]
    InvalidExtents {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    #[error("agent radius must be non-negative, got {0}")]
    NegativeRadius(f64),

    #[error("boundary extent is narrower than the agent diameter {diameter} on the {axis} axis")]
    BoundaryTooNarrow { axis: char, diameter: f64 },

    #[error("timestep must be positive, got {0}")]
    NonPositiveTimestep(f64),

    #[error("max speed must be positive, got {0}")]
    NonPositiveSpeed(f64),

    #[error("{name} variance must be positive, got {value}")]
    NonPositiveVariance { name: &'static str, value: f64 },

    #[error("speed profile parameter {name} must be positive, got {value}")]
    NonPositiveProfileParam { name: &'static str, value: f64 },
}

/// A corrupted filter state invalidates every subsequent estimate, so these
/// abort the run they occur in rather than being swallowed or retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    #[error("innovation covariance is singular; cannot compute the Kalman gain")]
    SingularInnovation,

    #[error("filter state is no longer finite")]
    NonFiniteState,
}
