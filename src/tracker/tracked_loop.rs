//! Cross-frame state for a single loop.

use crate::tracker::extractor::LoopCandidate;
use crate::tracker::geometry::{Point, polygon_area};
use crate::tracker::topology::LoopKind;
use crate::tracker::track_state::LoopState;

/// Source of loop ids. Ids increase monotonically and are never reused.
///
/// Owned by whoever drives the tracker, so independent trackers never share
/// an id sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopIdCounter {
    next: u64,
}

impl Default for LoopIdCounter {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl LoopIdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Get the next unique loop id.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next confirmation will receive.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

/// A loop followed across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedLoop {
    /// Stable id, set once on confirmation
    pub id: Option<u64>,
    /// Contour from the last matched frame
    pub points: Vec<Point>,
    /// Centroid from the last matched frame
    pub center: Point,
    /// Contact pattern the loop was first seen with
    pub kind: LoopKind,
    /// Frames matched so far, including the first
    pub age: u32,
    /// Consecutive frames without a match
    pub missing_frames: u32,
    /// Whether the loop has held long enough to get an id
    pub confirmed: bool,
}

impl TrackedLoop {
    /// Start tracking an unmatched candidate.
    pub fn new(candidate: LoopCandidate) -> Self {
        Self {
            id: None,
            points: candidate.points,
            center: candidate.center,
            kind: candidate.kind,
            age: 1,
            missing_frames: 0,
            confirmed: false,
        }
    }

    pub fn state(&self) -> LoopState {
        if self.missing_frames > 0 {
            LoopState::Missing
        } else if self.confirmed {
            LoopState::Confirmed
        } else {
            LoopState::Tentative
        }
    }

    /// Take over the matched candidate's geometry.
    pub fn update(&mut self, candidate: LoopCandidate) {
        self.points = candidate.points;
        self.center = candidate.center;
        self.missing_frames = 0;
        self.age += 1;
    }

    /// Assign an id if the loop is old enough. Returns true on the frame the
    /// loop becomes confirmed.
    pub fn try_confirm(&mut self, confirmation_threshold: u32, ids: &mut LoopIdCounter) -> bool {
        if self.confirmed || self.age < confirmation_threshold {
            return false;
        }
        self.id = Some(ids.next_id());
        self.confirmed = true;
        true
    }

    pub fn mark_missed(&mut self) {
        self.missing_frames += 1;
    }

    pub fn area(&self) -> f32 {
        polygon_area(&self.points)
    }
}
