/// Lifecycle state of a tracked loop, as seen by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Seen this frame, waiting for enough consecutive frames to get an id
    #[default]
    Tentative,
    /// Seen this frame and holding a stable id
    Confirmed,
    /// Not seen this frame, kept within the missing-frames grace period
    Missing,
}
