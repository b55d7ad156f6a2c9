//! TrackerPipeline: the frame-loop driver combining detection with tracking.

use crate::tracker::{Track, TrackRegistry, TrackerConfig};

use super::DetectionSource;

/// A frame-loop driver that bundles detection inference with the registry.
///
/// Each call to [`process_frame`](Self::process_frame) runs one full frame:
/// detector inference, then the registry's predict/associate/update/create
/// pass. The returned tracks are the visible set for the external renderer.
/// Processing is strictly frame-sequential; the registry is never touched
/// outside this call.
pub struct TrackerPipeline<D: DetectionSource> {
    detector: D,
    registry: TrackRegistry,
}

impl<D: DetectionSource> TrackerPipeline<D> {
    /// Create a new tracking pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Self {
        Self {
            detector,
            registry: TrackRegistry::new(config),
        }
    }

    /// Create a new tracking pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self::new(detector, TrackerConfig::default())
    }

    /// Process a single frame and return the visible tracks.
    ///
    /// Detector failures propagate to the caller; the registry is not
    /// advanced when detection fails, so the frame can be retried or the
    /// stream torn down without corrupting tracker state.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Track>, D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        Ok(self.registry.update(&detections))
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying registry.
    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    /// Get a mutable reference to the underlying registry.
    pub fn registry_mut(&mut self) -> &mut TrackRegistry {
        &mut self.registry
    }
}
