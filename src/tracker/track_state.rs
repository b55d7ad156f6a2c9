/// Track state enumeration for object tracking lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Recently matched, exposed to the renderer
    #[default]
    Tracked,
    /// Unmatched past the staleness threshold; hidden but still alive
    Stale,
    /// Unmatched past the pruning bound; terminal, removed from the registry
    Retired,
}
