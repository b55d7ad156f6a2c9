mod bbox;
mod detection;
mod kalman_filter;
mod registry;
mod track;
mod track_state;

pub use bbox::BBox;
pub use detection::Detection;
pub use kalman_filter::KalmanFilter;
pub use registry::{ConfigError, TrackRegistry, TrackerConfig};
pub use track::Track;
pub use track_state::TrackState;
