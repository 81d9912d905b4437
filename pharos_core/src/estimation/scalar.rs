// pharos_core/src/estimation/scalar.rs

use crate::error::{ConfigError, EstimationError};
use crate::estimation::{EstimateUpdate, PositionEstimator, INITIAL_COVARIANCE};
use crate::types::{Position, Velocity};

/// A one-dimensional Kalman recursion applied to both axes at once.
///
/// The model is a position random walk driven by the commanded velocity:
/// prediction is dead reckoning (`position + commanded * dt`) and the
/// correction blends in the measurement with a single scalar gain shared by
/// x and y. Far cheaper than [`super::ConstantVelocityKalman`] and adequate
/// whenever the actuators track their commands closely.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarKalman {
    /// Current position estimate.
    state: Position,
    /// Shared per-axis estimate variance P.
    variance: f64,
    /// Random-walk noise added to P each cycle.
    process_var: f64,
    /// Measurement noise variance.
    measurement_var: f64,
    /// Gain from the most recent correction.
    gain: f64,
}

impl ScalarKalman {
    /// Creates a filter at `start` with an [`INITIAL_COVARIANCE`] prior.
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
            state: start,
            variance: INITIAL_COVARIANCE,
            process_var,
            measurement_var,
            gain: 0.0,
        })
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }
}

impl PositionEstimator for ScalarKalman {
    /// Dead-reckoning predict, scalar-gain correct. The gain recursion is
    /// independent of the data: P' = P + Q, K = P'/(P' + R), P = (1 - K)P'.
    fn update(
        &mut self,
        measured: Position,
        commanded: Velocity,
        dt: f64,
    ) -> Result<EstimateUpdate, EstimationError> {
        let predicted = self.state + commanded * dt;

        let prior_var = self.variance + self.process_var;
        let k = prior_var / (prior_var + self.measurement_var);
        let estimate = predicted + (measured - predicted) * k;
        if !estimate.iter().all(|v| v.is_finite()) {
            return Err(EstimationError::NonFiniteState);
        }

        self.state = estimate;
        self.variance = (1.0 - k) * prior_var;
        self.gain = k;

        Ok(EstimateUpdate { estimate, predicted })
    }

    fn position(&self) -> Position {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn filter_at_origin() -> ScalarKalman {
        ScalarKalman::new(Position::new(0.0, 0.0), 0.01, 1.0).unwrap()
    }

    #[test]
    fn rejects_non_positive_variances() {
        let origin = Position::new(0.0, 0.0);
        assert!(ScalarKalman::new(origin, 0.0, 1.0).is_err());
        assert!(ScalarKalman::new(origin, 0.01, 0.0).is_err());
    }

    #[test]
    fn gain_decreases_toward_a_steady_state() {
        let mut kf = filter_at_origin();
        let z = Position::new(1.0, 1.0);

        let mut previous = 1.0;
        for _ in 0..10 {
            kf.update(z, Velocity::zeros(), 0.1).unwrap();
            let k = kf.gain();
            assert!(k > 0.0 && k < 1.0);
            assert!(k < previous);
            previous = k;
        }
        // Well on its way down from the first-step gain of ~0.5.
        assert!(previous < 0.2);
    }

    #[test]
    fn perfect_commanded_motion_tracks_exactly() {
        let mut kf = filter_at_origin();
        let v = Velocity::new(1.0, 0.5);
        let dt = 0.1;

        let mut truth = Position::new(0.0, 0.0);
        for _ in 0..10 {
            truth += v * dt;
            let out = kf.update(truth, v, dt).unwrap();
            // Prediction already matches the measurement, so the correction
            // is a no-op and the estimate is exact.
            assert_abs_diff_eq!(out.predicted.x, truth.x);
            assert_abs_diff_eq!(out.predicted.y, truth.y);
            assert_abs_diff_eq!(out.estimate.x, truth.x);
            assert_abs_diff_eq!(out.estimate.y, truth.y);
        }
        assert_abs_diff_eq!(kf.position().x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(kf.position().y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn both_axes_share_one_gain() {
        let mut kf = filter_at_origin();
        let out = kf.update(Position::new(1.0, 3.0), Velocity::zeros(), 0.1).unwrap();

        // estimate = K * z when predicting from the origin.
        assert_abs_diff_eq!(out.estimate.x, kf.gain(), epsilon = 1e-12);
        assert_abs_diff_eq!(out.estimate.y, 3.0 * kf.gain(), epsilon = 1e-12);
        assert!(out.estimate.x > 0.0 && out.estimate.x < 1.0);
    }

    #[test]
    fn variance_shrinks_and_stays_positive() {
        let mut kf = filter_at_origin();
        let z = Position::new(2.0, -2.0);

        let mut previous = kf.variance();
        assert_abs_diff_eq!(previous, INITIAL_COVARIANCE);
        for _ in 0..10 {
            kf.update(z, Velocity::zeros(), 0.1).unwrap();
            assert!(kf.variance() > 0.0);
            assert!(kf.variance() < previous);
            previous = kf.variance();
        }
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let mut kf = filter_at_origin();
        assert_eq!(
            kf.update(Position::new(f64::NAN, 0.0), Velocity::zeros(), 0.1),
            Err(EstimationError::NonFiniteState)
        );
        assert_eq!(
            kf.update(Position::new(1.0, 1.0), Velocity::new(f64::INFINITY, 0.0), 0.1),
            Err(EstimationError::NonFiniteState)
        );
        // Rejected cycles leave the filter untouched.
        assert_abs_diff_eq!(kf.position().x, 0.0);
        assert_abs_diff_eq!(kf.variance(), INITIAL_COVARIANCE);
    }
}
