// pharos_core/src/agent.rs

use crate::constraints::{Boundary, ObstacleField};
use crate::error::ConfigError;
use crate::types::{Position, Velocity};

/// The physical point-agent: the single owner of ground-truth position.
///
/// Each call to [`Agent::step`] integrates one commanded velocity over one
/// timestep and repairs the result against whatever constraints are attached,
/// obstacles first, then the outer boundary. Estimators and planners never
/// see this struct directly; they work from measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    position: Position,
    dt: f64,
    boundary: Option<Boundary>,
    obstacles: Option<ObstacleField>,
    /// Every position the agent has occupied, starting point included.
    path: Vec<Position>,
    collision_count: u32,
}

impl Agent {
    pub fn new(start: Position, dt: f64) -> Result<Self, ConfigError> {
        if dt <= 0.0 {
            return Err(ConfigError::NonPositiveTimestep(dt));
        }
        Ok(Self {
            position: start,
            dt,
            boundary: None,
            obstacles: None,
            path: vec![start],
            collision_count: 0,
        })
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn with_obstacles(mut self, obstacles: ObstacleField) -> Self {
        self.obstacles = Some(obstacles);
        self
    }

    /// Integrates `commanded` over one timestep, repairing the candidate
    /// against obstacles and then the boundary. Returns the committed
    /// position and the commanded speed. Each constraint the candidate
    /// violates bumps the collision counter by one, so a single step can
    /// add two.
    pub fn step(&mut self, commanded: Velocity) -> (Position, f64) {
        let mut candidate = self.position + commanded * self.dt;

        if let Some(field) = &self.obstacles {
            if field.is_colliding(candidate) {
                candidate = field.resolve(candidate, self.position);
                self.collision_count += 1;
            }
        }

        if let Some(boundary) = &self.boundary {
            if boundary.is_outside(candidate) {
                candidate = boundary.correct(candidate, self.position);
                self.collision_count += 1;
            }
        }

        self.position = candidate;
        self.path.push(candidate);
        (candidate, commanded.norm())
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Trajectory so far; `path()[0]` is the start position.
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn collision_count(&self) -> u32 {
        self.collision_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::Obstacle;
    use approx::assert_abs_diff_eq;

    fn block() -> Obstacle {
        Obstacle {
            x_min: 2.0,
            x_max: 4.0,
            y_min: -1.0,
            y_max: 1.0,
        }
    }

    #[test]
    fn rejects_non_positive_timestep() {
        assert!(matches!(
            Agent::new(Position::new(0.0, 0.0), 0.0),
            Err(ConfigError::NonPositiveTimestep(_))
        ));
    }

    #[test]
    fn free_step_is_exact_integration() {
        let mut agent = Agent::new(Position::new(0.0, 0.0), 0.1).unwrap();
        let (pos, speed) = agent.step(Velocity::new(1.0, 2.0));

        assert_abs_diff_eq!(pos.x, 0.1);
        assert_abs_diff_eq!(pos.y, 0.2);
        assert_abs_diff_eq!(speed, 5.0_f64.sqrt());
        assert_eq!(agent.collision_count(), 0);
        assert_eq!(agent.path().len(), 2);
        assert_abs_diff_eq!(agent.path()[0].x, 0.0);
    }

    #[test]
    fn zero_command_still_records_history() {
        let mut agent = Agent::new(Position::new(3.0, 4.0), 0.1).unwrap();
        let (pos, speed) = agent.step(Velocity::zeros());

        assert_abs_diff_eq!(pos.x, 3.0);
        assert_abs_diff_eq!(pos.y, 4.0);
        assert_abs_diff_eq!(speed, 0.0);
        assert_eq!(agent.path().len(), 2);
        assert_eq!(agent.collision_count(), 0);
    }

    #[test]
    fn boundary_violation_is_clamped_and_counted() {
        let boundary = Boundary::new(-10.0, 10.0, -10.0, 10.0, 0.5, 2.0, 1.0).unwrap();
        let mut agent = Agent::new(Position::new(9.0, 0.0), 1.0)
            .unwrap()
            .with_boundary(boundary);

        let (pos, _) = agent.step(Velocity::new(1.3, 0.0));
        assert_abs_diff_eq!(pos.x, 9.5);
        assert_abs_diff_eq!(pos.y, 0.0);
        assert_eq!(agent.collision_count(), 1);
    }

    #[test]
    fn obstacle_slide_is_counted_once() {
        let mut field = ObstacleField::new(0.0, 2.0, 1.0).unwrap();
        field.add(block()).unwrap();
        let mut agent = Agent::new(Position::new(1.0, -2.0), 1.0)
            .unwrap()
            .with_obstacles(field);

        // Diagonal into the block's lower face slides along it.
        let (pos, _) = agent.step(Velocity::new(2.0, 1.5));
        assert_abs_diff_eq!(pos.x, 3.0);
        assert_abs_diff_eq!(pos.y, -2.0);
        assert_eq!(agent.collision_count(), 1);
    }

    #[test]
    fn blocked_agent_stays_put_but_keeps_counting() {
        let mut field = ObstacleField::new(0.0, 2.0, 1.0).unwrap();
        field.add(block()).unwrap();
        let mut agent = Agent::new(Position::new(0.0, 0.0), 1.0)
            .unwrap()
            .with_obstacles(field);

        // Head-on approach along y = 0: both slides fail to clear the block.
        for step in 1..=3 {
            let (pos, _) = agent.step(Velocity::new(2.0, 0.0));
            assert_abs_diff_eq!(pos.x, 0.0);
            assert_abs_diff_eq!(pos.y, 0.0);
            assert_eq!(agent.collision_count(), step);
        }
        assert_eq!(agent.path().len(), 4);
    }

    #[test]
    fn collision_inside_an_obstacle_is_counted_even_without_motion() {
        let mut field = ObstacleField::new(0.0, 2.0, 1.0).unwrap();
        field.add(block()).unwrap();
        let mut agent = Agent::new(Position::new(3.0, 0.0), 1.0)
            .unwrap()
            .with_obstacles(field);

        // Zero command from inside the block: every slide candidate is the
        // same point, so the agent stays where it is, but the contact is
        // still a counted collision.
        let (pos, speed) = agent.step(Velocity::zeros());
        assert_abs_diff_eq!(pos.x, 3.0);
        assert_abs_diff_eq!(pos.y, 0.0);
        assert_abs_diff_eq!(speed, 0.0);
        assert_eq!(agent.collision_count(), 1);
    }

    #[test]
    fn obstacle_and_boundary_can_both_fire_in_one_step() {
        let boundary = Boundary::new(-10.0, 10.0, -10.0, 10.0, 0.5, 2.0, 1.0).unwrap();
        let mut field = ObstacleField::new(0.5, 2.0, 1.0).unwrap();
        field
            .add(Obstacle {
                x_min: 2.0,
                x_max: 4.0,
                y_min: 8.0,
                y_max: 12.0,
            })
            .unwrap();
        let mut agent = Agent::new(Position::new(1.0, 9.0), 1.0)
            .unwrap()
            .with_boundary(boundary)
            .with_obstacles(field);

        // The full step and its horizontal slide both hit the obstacle; the
        // vertical slide clears it but pokes past the top boundary edge.
        let (pos, _) = agent.step(Velocity::new(2.0, 0.8));
        assert_abs_diff_eq!(pos.x, 1.0);
        assert_abs_diff_eq!(pos.y, 9.5);
        assert_eq!(agent.collision_count(), 2);
    }
}
