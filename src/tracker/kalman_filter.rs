//! Kalman filter for bounding box tracking using ndarray and a nalgebra-based inverse.
//!
//! The state is 8-dimensional: the four box corner coordinates plus one
//! velocity per coordinate. Each coordinate moves independently at constant
//! velocity; only the four positions are observed.

use ndarray::{Array1, Array2};

/// Dimensionality of the observed measurement (the four box corners).
const NDIM: usize = 4;

#[derive(Debug, Clone)]
pub struct KalmanFilter {
    motion_mat: Array2<f64>,
    update_mat: Array2<f64>,
    measurement_cov: Array2<f64>,
    process_cov: Array2<f64>,
    initial_uncertainty: f64,
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self::new(10.0, 1000.0, 0.01)
    }
}

impl KalmanFilter {
    /// Build a filter with the given noise scales over unit matrices:
    /// `measurement_noise` for R, `initial_uncertainty` for the initial P,
    /// `process_noise` for Q.
    pub fn new(measurement_noise: f64, initial_uncertainty: f64, process_noise: f64) -> Self {
        let mut motion_mat = Array2::eye(2 * NDIM);
        for i in 0..NDIM {
            motion_mat[[i, NDIM + i]] = 1.0;
        }

        let mut update_mat = Array2::zeros((NDIM, 2 * NDIM));
        for i in 0..NDIM {
            update_mat[[i, i]] = 1.0;
        }

        Self {
            motion_mat,
            update_mat,
            measurement_cov: Array2::eye(NDIM) * measurement_noise,
            process_cov: Array2::eye(2 * NDIM) * process_noise,
            initial_uncertainty,
        }
    }

    /// Initialize a track state from an observed box: positions from the
    /// measurement, velocities zero, covariance at the initial scale.
    pub fn initiate(&self, measurement: [f64; 4]) -> (Array1<f64>, Array2<f64>) {
        let mut mean = Array1::zeros(2 * NDIM);
        for i in 0..NDIM {
            mean[i] = measurement[i];
        }

        let cov = Array2::eye(2 * NDIM) * self.initial_uncertainty;

        (mean, cov)
    }

    /// Advance the state one time step under the constant-velocity model.
    pub fn predict(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
    ) -> (Array1<f64>, Array2<f64>) {
        let new_mean = self.motion_mat.dot(mean);
        let new_covariance =
            self.motion_mat.dot(covariance).dot(&self.motion_mat.t()) + &self.process_cov;

        (new_mean, new_covariance)
    }

    /// Project the state into measurement space: (Hx, HPH^T + R).
    pub fn project(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
    ) -> (Array1<f64>, Array2<f64>) {
        let mean_proj = self.update_mat.dot(mean);
        let covariance_proj =
            self.update_mat.dot(covariance).dot(&self.update_mat.t()) + &self.measurement_cov;

        (mean_proj, covariance_proj)
    }

    /// Fold an observed box into the state per the Kalman correction rule.
    pub fn update(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
        measurement: [f64; 4],
    ) -> (Array1<f64>, Array2<f64>) {
        let (projected_mean, projected_cov) = self.project(mean, covariance);

        let measurement_arr = Array1::from_vec(measurement.to_vec());
        let innovation = measurement_arr - projected_mean;

        // K = P * H^T * S^-1
        // Since H is [I 0], P * H^T is the first 4 columns of P (8x4).
        // S is projected_cov (4x4).

        // We use nalgebra internally for 4x4 inversion to avoid BLAS/LAPACK.
        let s_inv = self.invert_4x4(&projected_cov);

        let pht = covariance.dot(&self.update_mat.t()); // 8x4
        let kalman_gain = pht.dot(&s_inv); // 8x4

        let new_mean = mean + kalman_gain.dot(&innovation);
        let new_covariance = covariance - kalman_gain.dot(&projected_cov).dot(&kalman_gain.t());

        (new_mean, new_covariance)
    }

    /// Helper to invert a 4x4 matrix using nalgebra (pure Rust).
    ///
    /// S = HPH^T + R is positive definite whenever the measurement noise
    /// scale is positive, so the inverse exists for any valid covariance.
    fn invert_4x4(&self, m: &Array2<f64>) -> Array2<f64> {
        let mut nm = nalgebra::Matrix4::zeros();
        for i in 0..NDIM {
            for j in 0..NDIM {
                nm[(i, j)] = m[[i, j]];
            }
        }
        let inv = nm.try_inverse().unwrap_or_else(nalgebra::Matrix4::identity);
        let mut res = Array2::zeros((NDIM, NDIM));
        for i in 0..NDIM {
            for j in 0..NDIM {
                res[[i, j]] = inv[(i, j)];
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initiate() {
        let kf = KalmanFilter::default();
        let (mean, cov) = kf.initiate([10.0, 20.0, 30.0, 40.0]);

        assert_eq!(mean[0], 10.0);
        assert_eq!(mean[3], 40.0);
        // Velocities start at zero.
        for i in 4..8 {
            assert_eq!(mean[i], 0.0);
        }
        assert_eq!(cov[[0, 0]], 1000.0);
    }

    #[test]
    fn test_predict_zero_velocity_keeps_position() {
        let kf = KalmanFilter::default();
        let (mean, cov) = kf.initiate([10.0, 20.0, 30.0, 40.0]);
        let (mean, _) = kf.predict(&mean, &cov);

        assert_eq!(mean[0], 10.0);
        assert_eq!(mean[1], 20.0);
        assert_eq!(mean[2], 30.0);
        assert_eq!(mean[3], 40.0);
    }

    #[test]
    fn test_predict_applies_velocity() {
        let kf = KalmanFilter::default();
        let (mut mean, cov) = kf.initiate([10.0, 20.0, 30.0, 40.0]);
        mean[4] = 2.0; // vx1

        let (mean, _) = kf.predict(&mean, &cov);
        assert_eq!(mean[0], 12.0);
        assert_eq!(mean[4], 2.0);
    }

    #[test]
    fn test_predict_grows_uncertainty() {
        let kf = KalmanFilter::default();
        let (mean, cov) = kf.initiate([10.0, 20.0, 30.0, 40.0]);
        let (_, new_cov) = kf.predict(&mean, &cov);

        assert!(new_cov[[0, 0]] > cov[[0, 0]]);
    }

    #[test]
    fn test_update_pulls_toward_measurement() {
        let kf = KalmanFilter::default();
        let (mean, cov) = kf.initiate([0.0, 0.0, 10.0, 10.0]);
        let (mean, cov) = kf.predict(&mean, &cov);
        let (mean, cov) = kf.update(&mean, &cov, [4.0, 4.0, 14.0, 14.0]);

        // With initial uncertainty far above measurement noise the update
        // lands close to the measurement.
        assert!((mean[0] - 4.0).abs() < 0.1);
        assert!((mean[2] - 14.0).abs() < 0.1);
        // Uncertainty shrinks after incorporating an observation.
        assert!(cov[[0, 0]] < 1000.0);
    }
}
