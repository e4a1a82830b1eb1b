//! Loop topology table.
//!
//! A topology pairs one or more fingertip contacts with the joint contour
//! that encloses the gap those contacts close off. Joint indices are flat
//! indices into the frame, see [`crate::tracker::hand`].

use crate::tracker::geometry::{Point, distance};
use crate::tracker::hand::*;

/// Which contact pattern produced a loop. Used for display only, never for
/// matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopKind {
    ThumbIndex,
    ThumbMiddle,
    ThumbRing,
    ThumbPinky,
    /// Web between index and middle fingertips.
    IndexMiddle,
    MiddleRing,
    RingPinky,
    /// Two hands, thumb to thumb and index to index.
    PairedThumbsIndexes,
    /// Two hands, each thumb touching the other hand's index.
    CrossedThumbsIndexes,
}

impl LoopKind {
    /// Whether the loop spans two hands.
    pub fn is_two_handed(&self) -> bool {
        matches!(
            self,
            LoopKind::PairedThumbsIndexes | LoopKind::CrossedThumbsIndexes
        )
    }
}

/// Single-hand topologies in hand-local joint indices.
const SINGLE_HAND: [(LoopKind, (usize, usize), &[usize]); 7] = [
    (
        LoopKind::ThumbIndex,
        (THUMB_TIP, INDEX_TIP),
        &[THUMB_MCP, THUMB_IP, THUMB_TIP, INDEX_TIP, INDEX_DIP, INDEX_PIP, INDEX_MCP],
    ),
    (
        LoopKind::ThumbMiddle,
        (THUMB_TIP, MIDDLE_TIP),
        &[THUMB_MCP, THUMB_IP, THUMB_TIP, MIDDLE_TIP, MIDDLE_DIP, MIDDLE_PIP, MIDDLE_MCP],
    ),
    (
        LoopKind::ThumbRing,
        (THUMB_TIP, RING_TIP),
        &[THUMB_MCP, THUMB_IP, THUMB_TIP, RING_TIP, RING_DIP, RING_PIP, RING_MCP],
    ),
    (
        LoopKind::ThumbPinky,
        (THUMB_TIP, PINKY_TIP),
        &[THUMB_MCP, THUMB_IP, THUMB_TIP, PINKY_TIP, PINKY_DIP, PINKY_PIP, PINKY_MCP],
    ),
    (
        LoopKind::IndexMiddle,
        (INDEX_TIP, MIDDLE_TIP),
        &[
            INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP, MIDDLE_TIP, MIDDLE_DIP, MIDDLE_PIP,
            MIDDLE_MCP,
        ],
    ),
    (
        LoopKind::MiddleRing,
        (MIDDLE_TIP, RING_TIP),
        &[
            MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP, RING_TIP, RING_DIP, RING_PIP, RING_MCP,
        ],
    ),
    (
        LoopKind::RingPinky,
        (RING_TIP, PINKY_TIP),
        &[
            RING_MCP, RING_PIP, RING_DIP, RING_TIP, PINKY_TIP, PINKY_DIP, PINKY_PIP, PINKY_MCP,
        ],
    ),
];

/// One row of the topology table.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopTopology {
    pub kind: LoopKind,
    /// Flat joint pairs that must all be touching.
    pub touching: Vec<(usize, usize)>,
    /// Flat joint indices of the loop contour, in drawing order.
    pub boundary: Vec<usize>,
}

impl LoopTopology {
    /// Whether every required pair is present and closer than `threshold`.
    pub fn fires(&self, hands: &FrameHands, threshold: f32) -> bool {
        self.touching
            .iter()
            .all(|&(a, b)| match (hands.joint(a), hands.joint(b)) {
                (Some(pa), Some(pb)) => distance(&pa, &pb) < threshold,
                _ => false,
            })
    }

    /// Resolve the contour against the frame. `None` if any joint is absent.
    pub fn boundary_points(&self, hands: &FrameHands) -> Option<Vec<Point>> {
        self.boundary.iter().map(|&i| hands.joint(i)).collect()
    }
}

/// Topology table for a frame with `hand_count` hands.
///
/// Order: every single-hand topology for hand 0, then hand 1, and so on,
/// followed by the two-hand topologies for each hand pair `(a, b)`, `a < b`.
pub fn topologies(hand_count: usize) -> Vec<LoopTopology> {
    let mut table = Vec::new();

    for hand in 0..hand_count {
        let off = hand_offset(hand);
        for (kind, (a, b), boundary) in SINGLE_HAND.iter() {
            table.push(LoopTopology {
                kind: *kind,
                touching: vec![(off + a, off + b)],
                boundary: boundary.iter().map(|j| off + j).collect(),
            });
        }
    }

    for a in 0..hand_count {
        for b in (a + 1)..hand_count {
            table.push(paired_thumbs_indexes(a, b));
            table.push(crossed_thumbs_indexes(a, b));
        }
    }

    table
}

fn paired_thumbs_indexes(a: usize, b: usize) -> LoopTopology {
    let l = |j| flat_index(a, j);
    let r = |j| flat_index(b, j);
    LoopTopology {
        kind: LoopKind::PairedThumbsIndexes,
        touching: vec![(l(THUMB_TIP), r(THUMB_TIP)), (l(INDEX_TIP), r(INDEX_TIP))],
        boundary: vec![
            // left thumb out, right thumb back
            l(THUMB_MCP),
            l(THUMB_IP),
            l(THUMB_TIP),
            r(THUMB_TIP),
            r(THUMB_IP),
            r(THUMB_MCP),
            // right index out, left index back
            r(INDEX_MCP),
            r(INDEX_PIP),
            r(INDEX_DIP),
            r(INDEX_TIP),
            l(INDEX_TIP),
            l(INDEX_DIP),
            l(INDEX_PIP),
            l(INDEX_MCP),
        ],
    }
}

fn crossed_thumbs_indexes(a: usize, b: usize) -> LoopTopology {
    let l = |j| flat_index(a, j);
    let r = |j| flat_index(b, j);
    LoopTopology {
        kind: LoopKind::CrossedThumbsIndexes,
        touching: vec![(l(THUMB_TIP), r(INDEX_TIP)), (l(INDEX_TIP), r(THUMB_TIP))],
        boundary: vec![
            l(THUMB_MCP),
            l(THUMB_IP),
            l(THUMB_TIP),
            r(INDEX_TIP),
            r(INDEX_DIP),
            r(INDEX_PIP),
            r(INDEX_MCP),
            r(THUMB_MCP),
            r(THUMB_IP),
            r(THUMB_TIP),
            l(INDEX_TIP),
            l(INDEX_DIP),
            l(INDEX_PIP),
            l(INDEX_MCP),
        ],
    }
}
