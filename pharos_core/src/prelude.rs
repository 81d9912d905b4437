// pharos_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::estimation::{EstimateUpdate, PositionEstimator};
pub use crate::types::{Position, Velocity};

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::agent::Agent;
pub use crate::constraints::{Boundary, Obstacle, ObstacleField};
pub use crate::error::{ConfigError, EstimationError};

// --- Concrete Algorithm Implementations (Export common ones for convenience) ---
pub use crate::estimation::{ConstantVelocityKalman, ScalarKalman};
pub use crate::planner::{GoToGoalPlanner, SpeedProfile};
