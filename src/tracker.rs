mod extractor;
mod geometry;
mod hand;
mod loop_tracker;
mod matching;
mod smoothing;
mod topology;
mod track_state;
mod tracked_loop;

pub use extractor::{LoopCandidate, extract_loops, match_topologies};
pub use geometry::{
    MAX_SAMPLE_ATTEMPTS, Point, bounding_box, distance, point_in_polygon, polygon_area,
    polygon_center, random_point_in_polygon,
};
pub use hand::{FrameHands, Hand, JOINTS_PER_HAND, Joint, flat_index, hand_offset};
pub use loop_tracker::{LoopTracker, TrackerConfig, update_tracks};
pub use matching::MatchStrategy;
pub use smoothing::HandSmoother;
pub use topology::{LoopKind, LoopTopology, topologies};
pub use track_state::LoopState;
pub use tracked_loop::{LoopIdCounter, TrackedLoop};

/// Joint indices of the 21-point hand skeleton.
pub mod joints {
    pub use super::hand::{
        INDEX_DIP, INDEX_MCP, INDEX_PIP, INDEX_TIP, MIDDLE_DIP, MIDDLE_MCP, MIDDLE_PIP,
        MIDDLE_TIP, PINKY_DIP, PINKY_MCP, PINKY_PIP, PINKY_TIP, RING_DIP, RING_MCP, RING_PIP,
        RING_TIP, THUMB_CMC, THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST,
    };
}
