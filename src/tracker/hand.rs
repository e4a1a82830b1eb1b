//! Hand landmark containers and the flat joint index scheme.
//!
//! A frame's hands are addressed as one flat joint array in detection order:
//! hand 0 occupies indices `0..21`, hand 1 occupies `21..42`, and so on.
//! Lookups past the detected hands, or into a hand with too few joints,
//! return `None` instead of panicking.

use nalgebra::Point3;

use crate::tracker::geometry::Point;

/// A normalized joint position. `z` is relative depth and is ignored by the
/// planar loop logic.
pub type Joint = Point3<f32>;

/// Number of joints in a complete hand skeleton.
pub const JOINTS_PER_HAND: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Offset of hand `hand` in the flat joint array.
#[inline]
pub const fn hand_offset(hand: usize) -> usize {
    hand * JOINTS_PER_HAND
}

/// Flat index of joint `joint` on hand `hand`.
#[inline]
pub const fn flat_index(hand: usize, joint: usize) -> usize {
    hand_offset(hand) + joint
}

/// One detected hand: an ordered joint sequence in skeleton order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hand {
    joints: Vec<Joint>,
}

impl Hand {
    pub fn new(joints: Vec<Joint>) -> Self {
        Self { joints }
    }

    /// Build a hand from planar positions, with zero depth.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            joints: points
                .into_iter()
                .map(|p| Joint::new(p.x, p.y, 0.0))
                .collect(),
        }
    }

    /// Planar position of joint `index`, if present.
    #[inline]
    pub fn point(&self, index: usize) -> Option<Point> {
        self.joints.get(index).map(|j| Point::new(j.x, j.y))
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joints_mut(&mut self) -> &mut [Joint] {
        &mut self.joints
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Whether every skeleton joint is present.
    pub fn is_complete(&self) -> bool {
        self.joints.len() >= JOINTS_PER_HAND
    }
}

/// All hands detected in one frame, in detection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameHands {
    hands: Vec<Hand>,
}

impl FrameHands {
    pub fn new(hands: Vec<Hand>) -> Self {
        Self { hands }
    }

    pub fn push(&mut self, hand: Hand) {
        self.hands.push(hand);
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hand> {
        self.hands.iter()
    }

    /// Planar position at a flat joint index, see the module docs.
    pub fn joint(&self, flat: usize) -> Option<Point> {
        self.hands
            .get(flat / JOINTS_PER_HAND)?
            .point(flat % JOINTS_PER_HAND)
    }
}

impl From<Vec<Hand>> for FrameHands {
    fn from(hands: Vec<Hand>) -> Self {
        Self::new(hands)
    }
}

impl<'a> IntoIterator for &'a FrameHands {
    type Item = &'a Hand;
    type IntoIter = std::slice::Iter<'a, Hand>;

    fn into_iter(self) -> Self::IntoIter {
        self.hands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_hand(base: f32, len: usize) -> Hand {
        Hand::from_points((0..len).map(|i| Point::new(base + i as f32 * 0.01, 0.5)))
    }

    #[test]
    fn test_flat_index() {
        assert_eq!(flat_index(0, THUMB_TIP), 4);
        assert_eq!(flat_index(1, THUMB_TIP), 25);
        assert_eq!(flat_index(1, PINKY_TIP), 41);
        assert_eq!(hand_offset(2), 42);
    }

    #[test]
    fn test_frame_joint_lookup() {
        let frame = FrameHands::new(vec![numbered_hand(0.0, 21), numbered_hand(0.5, 21)]);
        let p = frame.joint(flat_index(1, INDEX_TIP)).unwrap();
        assert!((p.x - 0.58).abs() < 1e-6);
        assert!(frame.joint(flat_index(2, WRIST)).is_none());
    }

    #[test]
    fn test_partial_hand_lookup() {
        let frame = FrameHands::new(vec![numbered_hand(0.0, 5)]);
        assert!(frame.joint(THUMB_TIP).is_some());
        assert!(frame.joint(INDEX_MCP).is_none());
        assert!(!frame.hands()[0].is_complete());
    }
}
