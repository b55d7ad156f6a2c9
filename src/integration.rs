//! Integration module for connecting external collaborators with the tracker.
//!
//! This module provides the seams the tracking core deliberately does not
//! own: a trait for detection inference backends and a frame-loop driver
//! that feeds their output into the registry.

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use pipeline::TrackerPipeline;
