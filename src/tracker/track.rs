//! Single object track for multi-object tracking.

use ndarray::{Array1, Array2};

use crate::tracker::bbox::BBox;
use crate::tracker::detection::Detection;
use crate::tracker::kalman_filter::KalmanFilter;
use crate::tracker::track_state::TrackState;

/// One hypothesized object identity carried across frames.
///
/// Owns the Kalman state for its object. Ids are allocated by the registry,
/// strictly increasing and never reused.
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique track identifier
    pub track_id: u64,
    /// Current lifecycle state
    pub state: TrackState,
    /// Score of the detection that last updated this track
    pub score: f32,
    /// Class of the detection that created this track
    pub class_id: u32,
    /// Frames since the last successful detection match
    pub time_since_update: u32,
    /// Kalman filter state mean (8-dim: corners + corner velocities)
    mean: Array1<f64>,
    /// Kalman filter state covariance (8x8)
    covariance: Array2<f64>,
}

impl Track {
    /// Create a track from an unmatched detection.
    pub fn new(track_id: u64, detection: &Detection, kalman_filter: &KalmanFilter) -> Self {
        let (mean, covariance) = kalman_filter.initiate(detection.bbox.to_corners());
        Self {
            track_id,
            state: TrackState::Tracked,
            score: detection.score,
            class_id: detection.class_id,
            time_since_update: 0,
            mean,
            covariance,
        }
    }

    /// Current estimated bounding box (the position part of the state).
    pub fn bbox(&self) -> BBox {
        BBox::new(self.mean[0], self.mean[1], self.mean[2], self.mean[3])
    }

    /// Estimated box rounded to integer pixels, for overlay drawing.
    pub fn pixel_bbox(&self) -> [i32; 4] {
        self.bbox().to_pixels()
    }

    /// Advance the state one frame under the constant-velocity model and
    /// return the predicted box. Called exactly once per frame, before
    /// association; detections are matched against this prediction.
    pub fn predict(&mut self, kalman_filter: &KalmanFilter) -> BBox {
        let (mean, covariance) = kalman_filter.predict(&self.mean, &self.covariance);
        self.mean = mean;
        self.covariance = covariance;
        self.time_since_update += 1;
        self.bbox()
    }

    /// Fold a matched detection into the state. Only valid after the
    /// current frame's `predict`.
    pub fn update(&mut self, detection: &Detection, kalman_filter: &KalmanFilter) {
        let (mean, covariance) = kalman_filter.update(
            &self.mean,
            &self.covariance,
            detection.bbox.to_corners(),
        );
        self.mean = mean;
        self.covariance = covariance;
        self.score = detection.score;
        self.time_since_update = 0;
        self.state = TrackState::Tracked;
    }

    pub fn mark_stale(&mut self) {
        self.state = TrackState::Stale;
    }

    pub fn mark_retired(&mut self) {
        self.state = TrackState::Retired;
    }

    /// Whether the track is fresh enough to be exposed to the renderer.
    pub fn is_visible(&self, max_staleness: u32) -> bool {
        self.time_since_update < max_staleness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(x1: f64, y1: f64, x2: f64, y2: f64) -> Detection {
        Detection::new(x1, y1, x2, y2, 0.9, 0)
    }

    #[test]
    fn test_new_track_starts_at_detection() {
        let kf = KalmanFilter::default();
        let track = Track::new(1, &det(0.0, 0.0, 10.0, 10.0), &kf);

        assert_eq!(track.bbox(), BBox::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(track.time_since_update, 0);
        assert_eq!(track.state, TrackState::Tracked);
    }

    #[test]
    fn test_predict_with_zero_velocity_is_identity() {
        let kf = KalmanFilter::default();
        let mut track = Track::new(1, &det(0.0, 0.0, 10.0, 10.0), &kf);

        let predicted = track.predict(&kf);
        assert_eq!(predicted, BBox::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(track.time_since_update, 1);
    }

    #[test]
    fn test_update_resets_staleness() {
        let kf = KalmanFilter::default();
        let mut track = Track::new(1, &det(0.0, 0.0, 10.0, 10.0), &kf);

        track.predict(&kf);
        track.predict(&kf);
        assert_eq!(track.time_since_update, 2);

        track.update(&det(1.0, 1.0, 11.0, 11.0), &kf);
        assert_eq!(track.time_since_update, 0);
    }

    #[test]
    fn test_repeated_updates_converge_to_stationary_box() {
        let kf = KalmanFilter::default();
        let target = det(50.0, 60.0, 90.0, 120.0);
        let mut track = Track::new(1, &det(50.0, 60.0, 90.0, 120.0), &kf);

        for _ in 0..30 {
            track.predict(&kf);
            track.update(&target, &kf);
        }

        let predicted = track.predict(&kf);
        assert!((predicted.x1 - 50.0).abs() < 1.0);
        assert!((predicted.y1 - 60.0).abs() < 1.0);
        assert!((predicted.x2 - 90.0).abs() < 1.0);
        assert!((predicted.y2 - 120.0).abs() < 1.0);
    }

    #[test]
    fn test_track_follows_constant_motion() {
        let kf = KalmanFilter::default();
        let mut track = Track::new(1, &det(0.0, 0.0, 10.0, 10.0), &kf);

        // Feed a box moving +2px/frame in x for a while.
        for frame in 1..=20 {
            track.predict(&kf);
            let offset = 2.0 * frame as f64;
            track.update(&det(offset, 0.0, offset + 10.0, 10.0), &kf);
        }

        // The learned velocity should carry the prediction ahead.
        let predicted = track.predict(&kf);
        assert!((predicted.x1 - 42.0).abs() < 1.5);
    }
}
