//! greedytrack-rs: a greedy IoU multi-object tracker.
//!
//! Maintains temporal identity for objects detected independently in each
//! video frame. Every frame, each live track is advanced one step under a
//! constant-velocity Kalman model, detections are greedily associated to the
//! predicted boxes by IoU, matched tracks are corrected, unmatched
//! detections spawn new tracks, and tracks that go unmatched too long are
//! hidden and eventually retired.
//!
//! The constant-velocity motion model is a stated limitation: it suits
//! small, mostly-linear short-term motion and makes no attempt at
//! acceleration, appearance matching or re-identification.
//!
//! Detection inference and rendering are external: implement
//! [`DetectionSource`] for your model and drive frames through
//! [`TrackerPipeline`], or feed [`Detection`]s straight into a
//! [`TrackRegistry`].

pub mod integration;
pub mod tracker;

pub use integration::{DetectionBuilder, DetectionSource, IntoDetections, TrackerPipeline};
pub use tracker::{
    BBox, ConfigError, Detection, Track, TrackRegistry, TrackState, TrackerConfig,
};
