// pharos_core/src/constraints/obstacle.rs

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Position;

/// One axis-aligned rectangle of forbidden space.
///
/// A plain record with four named bounds so scenario files can embed
/// obstacles directly; extents are validated when the obstacle enters an
/// [`ObstacleField`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Obstacle {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Obstacle {
    /// Closed containment test against the rectangle inflated by `radius` on
    /// every side. Touching the inflated edge counts as colliding.
    fn contains(&self, pos: Position, radius: f64) -> bool {
        self.x_min - radius <= pos.x
            && pos.x <= self.x_max + radius
            && self.y_min - radius <= pos.y
            && pos.y <= self.y_max + radius
    }
}

/// An append-only collection of rectangular obstacles, checked in insertion
/// order (order is irrelevant to the outcome: any hit short-circuits).
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Radius of the agent's bounding disk.
    pub radius: f64,
    /// Kinematic context carried alongside the obstacles; the collision test
    /// itself never reads these.
    pub max_speed: f64,
    pub dt: f64,
}

impl ObstacleField {
    /// Builds an empty field, rejecting a negative agent radius and a
    /// non-positive speed limit or timestep.
    pub fn new(radius: f64, max_speed: f64, dt: f64) -> Result<Self, ConfigError> {
        if radius < 0.0 {
            return Err(ConfigError::NegativeRadius(radius));
        }
        if max_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(max_speed));
        }
        if dt <= 0.0 {
            return Err(ConfigError::NonPositiveTimestep(dt));
        }
        Ok(Self {
            obstacles: Vec::new(),
            radius,
            max_speed,
            dt,
        })
    }

    /// Appends an obstacle, rejecting inverted extents. Obstacles are
    /// immutable once added.
    pub fn add(&mut self, obstacle: Obstacle) -> Result<(), ConfigError> {
        if !(obstacle.x_min < obstacle.x_max) || !(obstacle.y_min < obstacle.y_max) {
            return Err(ConfigError::InvalidExtents {
                x_min: obstacle.x_min,
                x_max: obstacle.x_max,
                y_min: obstacle.y_min,
                y_max: obstacle.y_max,
            });
        }
        self.obstacles.push(obstacle);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// True if the radius-inflated position lies within any obstacle.
    pub fn is_colliding(&self, pos: Position) -> bool {
        self.obstacles.iter().any(|obs| obs.contains(pos, self.radius))
    }

    /// Repairs a colliding candidate by sliding along an obstacle face.
    ///
    /// Three tiers, in fixed order: keep the candidate if it is already
    /// collision-free; try horizontal-only motion `(new.x, old.y)`; try
    /// vertical-only motion `(old.x, new.y)`; otherwise stay at `old_pos`
    /// for this tick. Horizontal comes before vertical, so a diagonal
    /// approach into a convex corner resolves to horizontal motion whenever
    /// both slides are individually free.
    pub fn resolve(&self, new_pos: Position, old_pos: Position) -> Position {
        if !self.is_colliding(new_pos) {
            return new_pos;
        }

        let horizontal = Position::new(new_pos.x, old_pos.y);
        if !self.is_colliding(horizontal) {
            return horizontal;
        }

        let vertical = Position::new(old_pos.x, new_pos.y);
        if !self.is_colliding(vertical) {
            return vertical;
        }

        old_pos
    }
}
