//! Frame-to-frame loop tracking.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ConfigError, ensure_positive};
use crate::tracker::extractor::{LoopCandidate, extract_loops};
use crate::tracker::geometry::Point;
use crate::tracker::hand::FrameHands;
use crate::tracker::matching::{self, MatchStrategy};
use crate::tracker::tracked_loop::{LoopIdCounter, TrackedLoop};

/// Configuration for loop extraction and tracking.
///
/// All distances are in normalized frame units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Largest joint distance that still counts as touching
    pub touching_threshold: f32,
    /// Smallest loop area accepted from the extractor
    pub min_area: f32,
    /// Largest centroid move that still matches a loop across frames
    pub center_match_radius: f32,
    /// Matched frames needed before a loop gets an id
    pub confirmation_threshold: u32,
    /// Unmatched frames tolerated before a loop is dropped
    pub missing_frames_threshold: u32,
    pub match_strategy: MatchStrategy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            touching_threshold: 0.1,
            min_area: 0.003,
            center_match_radius: 0.2,
            confirmation_threshold: 3,
            missing_frames_threshold: 3,
            match_strategy: MatchStrategy::Greedy,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("touching_threshold", self.touching_threshold)?;
        ensure_positive("center_match_radius", self.center_match_radius)?;
        if !(self.min_area.is_finite() && self.min_area >= 0.0) {
            return Err(ConfigError::NegativeArea(self.min_area));
        }
        if self.confirmation_threshold == 0 {
            return Err(ConfigError::ZeroConfirmation);
        }
        Ok(())
    }
}

/// Advance the tracked loop set by one frame.
///
/// Every candidate either updates the loop it matched or starts a new
/// unconfirmed loop. Loops left unmatched age by one missing frame and are
/// dropped once `missing_frames` exceeds the configured threshold.
///
/// Output order: one entry per candidate in candidate order, followed by the
/// surviving unmatched loops in their previous order.
///
/// Must be called exactly once per frame, in frame order, with the previous
/// call's output.
pub fn update_tracks(
    previous: Vec<TrackedLoop>,
    candidates: Vec<LoopCandidate>,
    config: &TrackerConfig,
    ids: &mut LoopIdCounter,
) -> Vec<TrackedLoop> {
    let track_centers: Vec<Point> = previous.iter().map(|t| t.center).collect();
    let candidate_centers: Vec<Point> = candidates.iter().map(|c| c.center).collect();
    let dists = matching::center_distance(&track_centers, &candidate_centers);
    let assignment =
        matching::assign(&dists, config.center_match_radius, config.match_strategy);
    let track_for = assignment.track_for_candidates(candidates.len());

    let num_candidates = candidates.len();
    let mut pool: Vec<Option<TrackedLoop>> = previous.into_iter().map(Some).collect();
    let mut next = Vec::with_capacity(num_candidates + pool.len());

    for (candidate, matched) in candidates.into_iter().zip(track_for) {
        let track = match matched.and_then(|i| pool[i].take()) {
            Some(mut track) => {
                track.update(candidate);
                if track.try_confirm(config.confirmation_threshold, ids) {
                    debug!(id = ?track.id, age = track.age, "loop confirmed");
                }
                track
            }
            None => {
                // Confirmation waits for the first match.
                let track = TrackedLoop::new(candidate);
                debug!(kind = ?track.kind, x = track.center.x, y = track.center.y, "new loop");
                track
            }
        };
        next.push(track);
    }

    for mut track in pool.into_iter().flatten() {
        track.mark_missed();
        if track.missing_frames <= config.missing_frames_threshold {
            next.push(track);
        } else {
            debug!(id = ?track.id, age = track.age, "loop dropped");
        }
    }

    trace!(
        candidates = num_candidates,
        matched = assignment.matches.len(),
        tracked = next.len(),
        "loop tracks updated"
    );
    next
}

/// Owns the tracked loop set and id counter for one video stream.
#[derive(Debug, Clone)]
pub struct LoopTracker {
    tracked: Vec<TrackedLoop>,
    ids: LoopIdCounter,
    frame_id: u64,
    config: TrackerConfig,
}

impl Default for LoopTracker {
    fn default() -> Self {
        Self {
            tracked: Vec::new(),
            ids: LoopIdCounter::new(),
            frame_id: 0,
            config: TrackerConfig::default(),
        }
    }
}

impl LoopTracker {
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tracked: Vec::new(),
            ids: LoopIdCounter::new(),
            frame_id: 0,
            config,
        })
    }

    /// Use a caller-provided id sequence.
    pub fn with_id_counter(mut self, ids: LoopIdCounter) -> Self {
        self.ids = ids;
        self
    }

    /// Feed one frame's candidates and return the updated loop set.
    pub fn update(&mut self, candidates: Vec<LoopCandidate>) -> &[TrackedLoop] {
        self.frame_id += 1;
        let previous = std::mem::take(&mut self.tracked);
        self.tracked = update_tracks(previous, candidates, &self.config, &mut self.ids);
        &self.tracked
    }

    /// Extract loops from `hands` with the configured thresholds and track them.
    pub fn process(&mut self, hands: &FrameHands) -> &[TrackedLoop] {
        let candidates = extract_loops(
            hands,
            self.config.touching_threshold,
            self.config.min_area,
        );
        self.update(candidates)
    }

    pub fn tracked(&self) -> &[TrackedLoop] {
        &self.tracked
    }

    pub fn confirmed(&self) -> impl Iterator<Item = &TrackedLoop> {
        self.tracked.iter().filter(|t| t.confirmed)
    }

    /// Number of frames processed so far.
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn ids(&self) -> &LoopIdCounter {
        &self.ids
    }

    /// Forget every tracked loop. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.tracked.clear();
    }
}
