// pharos_core/src/constraints/boundary.rs

use crate::error::ConfigError;
use crate::types::Position;

/// The axis-aligned rectangle of permitted space.
///
/// Containment accounts for the agent's bounding disk: a position is outside
/// as soon as the disk pokes past any edge. Touching an edge exactly is still
/// inside. Violations are repaired by [`Boundary::correct`], which clamps
/// each axis independently. The repair moves position only, never velocity,
/// so the next tick's command is free to re-attempt the violation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Radius of the agent's bounding disk.
    pub radius: f64,
    /// Kinematic context carried alongside the extents; the containment test
    /// itself never reads these.
    pub max_speed: f64,
    pub dt: f64,
}

impl Boundary {
    /// Builds a boundary, rejecting degenerate geometry and kinematics:
    /// inverted extents, a negative radius, a non-positive speed limit or
    /// timestep, or extents too narrow to admit the agent disk (which would
    /// make the per-axis clamp oscillate instead of settling).
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        radius: f64,
        max_speed: f64,
        dt: f64,
    ) -> Result<Self, ConfigError> {
        if !(x_min < x_max) || !(y_min < y_max) {
            return Err(ConfigError::InvalidExtents {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }
        if radius < 0.0 {
            return Err(ConfigError::NegativeRadius(radius));
        }
        if max_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(max_speed));
        }
        if dt <= 0.0 {
            return Err(ConfigError::NonPositiveTimestep(dt));
        }
        let diameter = 2.0 * radius;
        if x_max - x_min < diameter {
            return Err(ConfigError::BoundaryTooNarrow { axis: 'x', diameter });
        }
        if y_max - y_min < diameter {
            return Err(ConfigError::BoundaryTooNarrow { axis: 'y', diameter });
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            radius,
            max_speed,
            dt,
        })
    }

    /// True if the radius-inflated position extends beyond any edge.
    /// Boundary-inclusive: a disk exactly touching an edge is inside.
    pub fn is_outside(&self, pos: Position) -> bool {
        pos.x - self.radius < self.x_min
            || pos.x + self.radius > self.x_max
            || pos.y - self.radius < self.y_min
            || pos.y + self.radius > self.y_max
    }

    /// Clamps a violating candidate back inside, one axis at a time.
    ///
    /// `_old_pos` is accepted for interface symmetry with
    /// [`ObstacleField::resolve`](crate::constraints::ObstacleField::resolve)
    /// but the clamp only inspects the candidate.
    pub fn correct(&self, pos: Position, _old_pos: Position) -> Position {
        let mut corrected = pos;

        if corrected.x - self.radius < self.x_min {
            corrected.x = self.x_min + self.radius;
        } else if corrected.x + self.radius > self.x_max {
            corrected.x = self.x_max - self.radius;
        }

        if corrected.y - self.radius < self.y_min {
            corrected.y = self.y_min + self.radius;
        } else if corrected.y + self.radius > self.y_max {
            corrected.y = self.y_max - self.radius;
        }

        corrected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square(radius: f64) -> Boundary {
        Boundary::new(-10.0, 10.0, -10.0, 10.0, radius, 2.0, 1.0).unwrap()
    }

    #[test]
    fn strictly_inside_is_inside() {
        let b = square(0.5);
        assert!(!b.is_outside(Position::new(0.0, 0.0)));
        assert!(!b.is_outside(Position::new(9.0, -9.0)));
    }

    #[test]
    fn touching_an_edge_is_inside_and_clamp_is_a_noop() {
        let b = square(0.5);
        // Disk extends exactly to x_max = 10.
        let touching = Position::new(9.5, 0.0);
        assert!(!b.is_outside(touching));
        let corrected = b.correct(touching, Position::new(0.0, 0.0));
        assert_abs_diff_eq!(corrected.x, 9.5);
        assert_abs_diff_eq!(corrected.y, 0.0);
    }

    #[test]
    fn violation_is_clamped_per_axis() {
        let b = square(0.5);
        let corrected = b.correct(Position::new(10.3, 0.0), Position::new(9.0, 0.0));
        assert_abs_diff_eq!(corrected.x, 9.5);
        assert_abs_diff_eq!(corrected.y, 0.0);

        // Both axes violated at once: each axis clamps independently.
        let corner = b.correct(Position::new(-12.0, 11.0), Position::new(0.0, 0.0));
        assert_abs_diff_eq!(corner.x, -9.5);
        assert_abs_diff_eq!(corner.y, 9.5);
    }

    #[test]
    fn correction_is_idempotent() {
        let b = square(1.0);
        let old = Position::new(0.0, 0.0);
        for candidate in [
            Position::new(15.0, 3.0),
            Position::new(-10.5, -10.5),
            Position::new(0.0, 25.0),
        ] {
            let once = b.correct(candidate, old);
            let twice = b.correct(once, old);
            assert_abs_diff_eq!(once.x, twice.x);
            assert_abs_diff_eq!(once.y, twice.y);
            assert!(!b.is_outside(once));
        }
    }

    #[test]
    fn degenerate_geometry_is_rejected() {
        assert!(matches!(
            Boundary::new(5.0, -5.0, -5.0, 5.0, 0.0, 2.0, 1.0),
            Err(ConfigError::InvalidExtents { .. })
        ));
        assert!(matches!(
            Boundary::new(-5.0, 5.0, -5.0, 5.0, -0.1, 2.0, 1.0),
            Err(ConfigError::NegativeRadius(_))
        ));
        assert!(matches!(
            Boundary::new(-5.0, 5.0, -5.0, 5.0, 0.5, -1.0, 1.0),
            Err(ConfigError::NonPositiveSpeed(_))
        ));
        assert!(matches!(
            Boundary::new(-5.0, 5.0, -5.0, 5.0, 0.5, 2.0, 0.0),
            Err(ConfigError::NonPositiveTimestep(_))
        ));
        // A 2-wide corridor cannot admit a radius-1.5 disk.
        assert!(matches!(
            Boundary::new(-1.0, 1.0, -5.0, 5.0, 1.5, 2.0, 1.0),
            Err(ConfigError::BoundaryTooNarrow { axis: 'x', .. })
        ));
    }

    #[test]
    fn exact_fit_extent_is_accepted_and_stable() {
        // Width equals the diameter: the only admissible x is the centerline.
        let b = Boundary::new(-1.0, 1.0, -5.0, 5.0, 1.0, 2.0, 1.0).unwrap();
        let corrected = b.correct(Position::new(0.7, 0.0), Position::new(0.0, 0.0));
        assert_abs_diff_eq!(corrected.x, 0.0);
        assert!(!b.is_outside(corrected));
    }
}
