//! Exponential smoothing of hand landmarks between frames.

use crate::error::ConfigError;
use crate::tracker::hand::{FrameHands, Hand, Joint};

/// Blends each joint with its smoothed position from the previous frame:
/// `previous * factor + current * (1 - factor)`.
///
/// Hands are matched by detection index. A hand whose joint count changed
/// since the last frame passes through unsmoothed.
#[derive(Debug, Clone)]
pub struct HandSmoother {
    factor: f32,
    previous: Vec<Hand>,
}

impl Default for HandSmoother {
    fn default() -> Self {
        Self {
            factor: 0.25,
            previous: Vec::new(),
        }
    }
}

impl HandSmoother {
    pub fn new(factor: f32) -> Result<Self, ConfigError> {
        if !(0.0..1.0).contains(&factor) {
            return Err(ConfigError::SmoothingFactor(factor));
        }
        Ok(Self {
            factor,
            previous: Vec::new(),
        })
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Smooth this frame's hands and remember the result for the next call.
    pub fn smooth(&mut self, hands: &FrameHands) -> FrameHands {
        let smoothed: Vec<Hand> = hands
            .iter()
            .enumerate()
            .map(|(i, hand)| match self.previous.get(i) {
                Some(prev) if prev.len() == hand.len() => self.blend(prev, hand),
                _ => hand.clone(),
            })
            .collect();
        self.previous = smoothed.clone();
        FrameHands::new(smoothed)
    }

    pub fn reset(&mut self) {
        self.previous.clear();
    }

    fn blend(&self, prev: &Hand, current: &Hand) -> Hand {
        let f = self.factor;
        let joints = prev
            .joints()
            .iter()
            .zip(current.joints())
            .map(|(p, c)| Joint::from(p.coords * f + c.coords * (1.0 - f)))
            .collect();
        Hand::new(joints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::geometry::Point;

    fn flat_hand(x: f32, len: usize) -> Hand {
        Hand::from_points((0..len).map(|_| Point::new(x, 0.5)))
    }

    #[test]
    fn test_first_frame_passes_through() {
        let mut s = HandSmoother::default();
        let frame = FrameHands::new(vec![flat_hand(0.4, 21)]);
        assert_eq!(s.smooth(&frame), frame);
    }

    #[test]
    fn test_blend() {
        let mut s = HandSmoother::default();
        s.smooth(&FrameHands::new(vec![flat_hand(0.0, 21)]));
        let out = s.smooth(&FrameHands::new(vec![flat_hand(1.0, 21)]));
        let p = out.joint(0).unwrap();
        assert!((p.x - 0.75).abs() < 1e-6);
        assert!((p.y - 0.5).abs() < 1e-6);

        // History is the smoothed frame, not the raw one.
        let out = s.smooth(&FrameHands::new(vec![flat_hand(1.0, 21)]));
        assert!((out.joint(0).unwrap().x - 0.9375).abs() < 1e-6);
    }

    #[test]
    fn test_joint_count_change_skips_smoothing() {
        let mut s = HandSmoother::default();
        s.smooth(&FrameHands::new(vec![flat_hand(0.0, 21)]));
        let out = s.smooth(&FrameHands::new(vec![flat_hand(1.0, 20)]));
        assert_eq!(out.joint(0).unwrap().x, 1.0);
    }

    #[test]
    fn test_invalid_factor() {
        assert_eq!(
            HandSmoother::new(1.0).unwrap_err(),
            ConfigError::SmoothingFactor(1.0)
        );
        assert!(HandSmoother::new(-0.1).is_err());
        assert!(HandSmoother::new(0.0).is_ok());
    }
}
