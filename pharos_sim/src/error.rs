// pharos_sim/src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Anything that can abort a simulation run, from a malformed scenario file
/// to a filter divergence mid-flight.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to load scenario: {0}")]
    Scenario(#[from] figment::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] pharos_core::error::ConfigError),

    #[error("estimation failed: {0}")]
    Estimation(#[from] pharos_core::error::EstimationError),

    #[error("invalid noise model: {0}")]
    Noise(#[from] rand_distr::NormalError),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
