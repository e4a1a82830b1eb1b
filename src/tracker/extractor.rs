//! Per-frame loop extraction. Stateless.

use crate::tracker::geometry::{Point, polygon_area, polygon_center};
use crate::tracker::hand::FrameHands;
use crate::tracker::topology::{LoopKind, topologies};

/// A loop found in a single frame. Carries no identity or history.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopCandidate {
    /// Closed contour, in drawing order.
    pub points: Vec<Point>,
    /// Vertex mean of `points`.
    pub center: Point,
    pub kind: LoopKind,
}

impl LoopCandidate {
    /// Build a candidate from a contour. `None` for an empty contour.
    pub fn new(points: Vec<Point>, kind: LoopKind) -> Option<Self> {
        let center = polygon_center(&points)?;
        Some(Self {
            points,
            center,
            kind,
        })
    }

    pub fn area(&self) -> f32 {
        polygon_area(&self.points)
    }
}

/// Every topology that fires in this frame, before the area filter.
///
/// Output follows topology table order. Overlapping loops are all kept.
pub fn match_topologies(hands: &FrameHands, touching_threshold: f32) -> Vec<LoopCandidate> {
    topologies(hands.len())
        .iter()
        .filter(|topology| topology.fires(hands, touching_threshold))
        .filter_map(|topology| {
            let points = topology.boundary_points(hands)?;
            LoopCandidate::new(points, topology.kind)
        })
        .collect()
}

/// Loops formed by touching fingers in this frame.
///
/// A pair of joints counts as touching when closer than
/// `touching_threshold`. Loops with area below `min_area` are dropped.
pub fn extract_loops(hands: &FrameHands, touching_threshold: f32, min_area: f32) -> Vec<LoopCandidate> {
    let mut loops = match_topologies(hands, touching_threshold);
    loops.retain(|candidate| candidate.area() >= min_area);
    loops
}
