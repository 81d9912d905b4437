// pharos_core/src/estimation/constant_velocity.rs

use nalgebra::{Matrix2, Matrix2x4, Matrix4, Matrix4x2, Vector4};

use crate::error::{ConfigError, EstimationError};
use crate::estimation::{EstimateUpdate, PositionEstimator, INITIAL_COVARIANCE};
use crate::types::{Position, Velocity};

/// A linear Kalman filter over the state [x, y, vx, vy] with a
/// constant-velocity motion model.
///
/// Process noise follows the discrete white-noise-acceleration model:
/// unmodeled acceleration is zero-mean noise of intensity `process_var`,
/// integrated over each timestep. Velocity is never measured directly; it is
/// inferred entirely through the position/velocity covariance coupling.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantVelocityKalman {
    /// Current state estimate [x, y, vx, vy].
    state: Vector4<f64>,
    /// State covariance P.
    covariance: Matrix4<f64>,
    /// Acceleration noise intensity driving Q.
    process_var: f64,
    /// Measurement noise variance; R = measurement_var * I.
    measurement_var: f64,
    /// Kalman gain from the most recent correction.
    gain: Matrix4x2<f64>,
}

impl ConstantVelocityKalman {
    /// Creates a filter at `start` with zero initial velocity and a diagonal
    /// prior of [`INITIAL_COVARIANCE`] on every component.
    pub fn new(
        start: Position,
        process_var: f64,
        measurement_var: f64,
    ) -> Result<Self, ConfigError> {
        if process_var <= 0.0 {
            return Err(ConfigError::NonPositiveVariance {
                name: "process_variance",
                value: process_var,
            });
        }
        if measurement_var <= 0.0 {
            return Err(ConfigError::NonPositiveVariance {
                name: "measurement_variance",
                value: measurement_var,
            });
        }
        Ok(Self {
            state: Vector4::new(start.x, start.y, 0.0, 0.0),
            covariance: Matrix4::identity() * INITIAL_COVARIANCE,
            process_var,
            measurement_var,
            gain: Matrix4x2::zeros(),
        })
    }

    /// Current velocity estimate.
    pub fn velocity(&self) -> Velocity {
        Velocity::new(self.state[2], self.state[3])
    }

    pub fn covariance(&self) -> &Matrix4<f64> {
        &self.covariance
    }

    pub fn gain(&self) -> &Matrix4x2<f64> {
        &self.gain
    }

    /// Build the state transition matrix F for timestep dt.
    fn transition(dt: f64) -> Matrix4<f64> {
        let mut f = Matrix4::identity();
        // position += velocity * dt
        f[(0, 2)] = dt;
        f[(1, 3)] = dt;
        f
    }

    /// Build the process noise matrix Q for timestep dt (DWNA model):
    /// Q_pos = q * dt^4/4,  Q_pos_vel = q * dt^3/2,  Q_vel = q * dt^2.
    fn process_noise(&self, dt: f64) -> Matrix4<f64> {
        let q = self.process_var;
        let dt2 = dt * dt;
        let dt3 = dt2 * dt;
        let dt4 = dt3 * dt;

        let mut qm = Matrix4::zeros();
        for i in 0..2usize {
            qm[(i, i)] = q * dt4 / 4.0;
            qm[(i + 2, i + 2)] = q * dt2;
            qm[(i, i + 2)] = q * dt3 / 2.0;
            qm[(i + 2, i)] = q * dt3 / 2.0;
        }
        qm
    }
}

impl PositionEstimator for ConstantVelocityKalman {
    /// One full predict-correct cycle. The commanded velocity is unused: the
    /// state vector already carries velocity, so the model predicts from its
    /// own estimate rather than from what the planner asked for.
    fn update(
        &mut self,
        measured: Position,
        _commanded: Velocity,
        dt: f64,
    ) -> Result<EstimateUpdate, EstimationError> {
        let f = Self::transition(dt);
        let q = self.process_noise(dt);

        // Predict: x' = F·x, P' = F·P·Fᵀ + Q
        let x_pred = f * self.state;
        let p_pred = f * self.covariance * f.transpose() + q;
        let predicted = Position::new(x_pred[0], x_pred[1]);

        // Correct against the position measurement: H picks [x, y].
        let h = Matrix2x4::new(1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let innovation = measured - h * x_pred;
        let s = h * p_pred * h.transpose() + Matrix2::identity() * self.measurement_var;
        let s_inv = s.try_inverse().ok_or(EstimationError::SingularInnovation)?;
        let k = p_pred * h.transpose() * s_inv;

        let new_state = x_pred + k * innovation;
        if !new_state.iter().all(|v| v.is_finite()) {
            return Err(EstimationError::NonFiniteState);
        }

        // Commit only once the cycle is known good; a failed update leaves
        // the previous state intact.
        self.state = new_state;
        self.covariance = (Matrix4::identity() - k * h) * p_pred;
        self.gain = k;

        Ok(EstimateUpdate {
            estimate: self.position(),
            predicted,
        })
    }

    fn position(&self) -> Position {
        Position::new(self.state[0], self.state[1])
    }
}
