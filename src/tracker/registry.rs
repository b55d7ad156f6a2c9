//! Track registry: per-frame prediction, greedy IoU association, track
//! creation and pruning.

use log::{debug, trace};
use thiserror::Error;

use crate::tracker::bbox::BBox;
use crate::tracker::detection::Detection;
use crate::tracker::kalman_filter::KalmanFilter;
use crate::tracker::track::Track;
use crate::tracker::track_state::TrackState;

/// Configuration for the tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Minimum detection confidence admitted into association
    pub score_thresh: f32,
    /// Only detections of this class are tracked; `None` accepts all classes
    pub target_class: Option<u32>,
    /// Minimum IoU between a predicted box and a detection for a match
    pub iou_thresh: f64,
    /// Frames without a match before a track is hidden from output
    pub max_staleness: u32,
    /// Frames without a match before a track is retired and removed
    pub max_age: u32,
    /// Measurement-noise scale (R) over a unit matrix
    pub measurement_noise: f64,
    /// Initial state-uncertainty scale (P)
    pub initial_uncertainty: f64,
    /// Process-noise scale (Q)
    pub process_noise: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            score_thresh: 0.5,
            target_class: None,
            iou_thresh: 0.3,
            max_staleness: 10,
            max_age: 30,
            measurement_noise: 10.0,
            initial_uncertainty: 1000.0,
            process_noise: 0.01,
        }
    }
}

/// Invalid tracker configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("iou_thresh must be within [0, 1], got {0}")]
    IouThreshOutOfRange(f64),
    #[error("max_age ({max_age}) must be >= max_staleness ({max_staleness})")]
    MaxAgeBelowStaleness { max_age: u32, max_staleness: u32 },
    #[error("noise scale {name} must be positive, got {value}")]
    NonPositiveNoiseScale { name: &'static str, value: f64 },
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.iou_thresh) {
            return Err(ConfigError::IouThreshOutOfRange(self.iou_thresh));
        }
        if self.max_age < self.max_staleness {
            return Err(ConfigError::MaxAgeBelowStaleness {
                max_age: self.max_age,
                max_staleness: self.max_staleness,
            });
        }
        for (name, value) in [
            ("measurement_noise", self.measurement_noise),
            ("initial_uncertainty", self.initial_uncertainty),
            ("process_noise", self.process_noise),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveNoiseScale { name, value });
            }
        }
        Ok(())
    }
}

/// Owner of all live tracks and the per-frame association step.
///
/// Tracks are held in creation order. The registry is the only place tracks
/// are created or removed, and it owns the id allocator, so identity
/// assignment is deterministic.
pub struct TrackRegistry {
    tracks: Vec<Track>,
    next_track_id: u64,
    frame_id: u64,
    config: TrackerConfig,
    kalman_filter: KalmanFilter,
}

impl Default for TrackRegistry {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl TrackRegistry {
    pub fn new(config: TrackerConfig) -> Self {
        let kalman_filter = KalmanFilter::new(
            config.measurement_noise,
            config.initial_uncertainty,
            config.process_noise,
        );
        Self {
            tracks: Vec::new(),
            next_track_id: 1,
            frame_id: 0,
            config,
            kalman_filter,
        }
    }

    /// All live tracks (visible and stale), in creation order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn next_track_id(&mut self) -> u64 {
        let id = self.next_track_id;
        self.next_track_id += 1;
        id
    }

    /// Process one frame of detections and return the visible tracks.
    ///
    /// Steps: predict every track once, gate detections by confidence and
    /// class, greedily associate each detection to the unclaimed track with
    /// the highest-IoU predicted box (strictly above `iou_thresh`; the
    /// earlier-created track wins ties), update matched tracks, spawn a
    /// track per unmatched detection, then retire tracks unmatched longer
    /// than `max_age`. A track is claimed by at most one detection per
    /// frame.
    pub fn update(&mut self, detections: &[Detection]) -> Vec<Track> {
        self.frame_id += 1;

        let predicted: Vec<BBox> = self
            .tracks
            .iter_mut()
            .map(|track| track.predict(&self.kalman_filter))
            .collect();

        let mut claimed = vec![false; self.tracks.len()];
        let mut matched = 0usize;
        let mut created = 0usize;

        for detection in detections {
            if !detection.passes(self.config.score_thresh, self.config.target_class) {
                continue;
            }

            let mut best_iou = 0.0;
            let mut best_index = None;
            for (index, bbox) in predicted.iter().enumerate() {
                if claimed[index] {
                    continue;
                }
                let overlap = bbox.iou(&detection.bbox);
                if overlap > best_iou {
                    best_iou = overlap;
                    best_index = Some(index);
                }
            }

            match best_index {
                Some(index) if best_iou > self.config.iou_thresh => {
                    let track = &mut self.tracks[index];
                    track.update(detection, &self.kalman_filter);
                    claimed[index] = true;
                    matched += 1;
                    trace!(
                        "frame {}: detection {:?} matched track {} (iou {:.3})",
                        self.frame_id, detection.bbox, track.track_id, best_iou
                    );
                }
                _ => {
                    let id = self.next_track_id();
                    self.tracks
                        .push(Track::new(id, detection, &self.kalman_filter));
                    created += 1;
                    trace!(
                        "frame {}: detection {:?} spawned track {}",
                        self.frame_id, detection.bbox, id
                    );
                }
            }
        }

        let mut retired = 0usize;
        let max_staleness = self.config.max_staleness;
        let max_age = self.config.max_age;
        self.tracks.retain_mut(|track| {
            if track.time_since_update > max_age {
                track.mark_retired();
                retired += 1;
                return false;
            }
            if !track.is_visible(max_staleness) {
                track.mark_stale();
            }
            true
        });

        debug!(
            "frame {}: {} detections, {} matched, {} created, {} retired, {} live",
            self.frame_id,
            detections.len(),
            matched,
            created,
            retired,
            self.tracks.len()
        );

        self.tracks
            .iter()
            .filter(|track| track.state == TrackState::Tracked)
            .cloned()
            .collect()
    }
}
