// pharos_core/src/types.rs

use nalgebra::Vector2;

// --- Core Type Aliases ---

/// A point in the 2D plane world, in meters.
pub type Position = Vector2<f64>;

/// A velocity in the 2D plane world, in meters per second.
pub type Velocity = Vector2<f64>;
