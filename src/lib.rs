//! Finger-loop detection and tracking for hand landmark streams.
//!
//! A hand pose model produces 21 normalized joints per hand for every video
//! frame. This crate finds closed "loops" traced by touching fingertips,
//! follows them across frames, and hands a stable set of identified loops to
//! rendering and bubble-spawning collaborators.
//!
//! ```
//! use handloop_rs::{LoopTracker, TrackerConfig, extract_loops, FrameHands};
//!
//! let config = TrackerConfig::default();
//! let mut tracker = LoopTracker::new(config.clone()).unwrap();
//!
//! let hands = FrameHands::default();
//! let candidates = extract_loops(&hands, config.touching_threshold, config.min_area);
//! let loops = tracker.update(candidates);
//! assert!(loops.is_empty());
//! ```

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::ConfigError;
pub use integration::{BubbleSeed, BubbleSpawner, HandBuilder, HandSource, LoopPipeline};
pub use tracker::{
    FrameHands, Hand, LoopCandidate, LoopIdCounter, LoopKind, LoopState, LoopTracker,
    MatchStrategy, Point, TrackedLoop, TrackerConfig, extract_loops, update_tracks,
};
