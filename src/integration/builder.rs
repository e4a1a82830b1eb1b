//! Builder for creating Hand objects from various landmark layouts.

use crate::tracker::{Hand, Joint};

/// Builder for creating a [`Hand`] from raw model output.
///
/// Pixel coordinates are normalized by the frame size given to
/// [`HandBuilder::frame_size`]; without one they are taken as already
/// normalized.
#[derive(Debug, Clone, Default)]
pub struct HandBuilder {
    joints: Vec<Joint>,
    frame_size: Option<(f32, f32)>,
    mirror: bool,
}

impl HandBuilder {
    /// Create a new hand builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize coordinates by this frame size in pixels.
    pub fn frame_size(mut self, width: u32, height: u32) -> Self {
        self.frame_size = Some((width as f32, height as f32));
        self
    }

    /// Flip horizontally, for selfie-view cameras.
    pub fn mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Append one joint.
    pub fn joint(mut self, x: f32, y: f32, z: f32) -> Self {
        self.joints.push(Joint::new(x, y, z));
        self
    }

    /// Append joints from a flat `[x, y, z, x, y, z, ...]` buffer. A trailing
    /// partial triple is ignored.
    pub fn xyz(mut self, flat: &[f32]) -> Self {
        self.joints.extend(
            flat.chunks_exact(3)
                .map(|c| Joint::new(c[0], c[1], c[2])),
        );
        self
    }

    /// Append joints from a flat `[x, y, x, y, ...]` buffer with zero depth.
    pub fn xy(mut self, flat: &[f32]) -> Self {
        self.joints.extend(
            flat.chunks_exact(2)
                .map(|c| Joint::new(c[0], c[1], 0.0)),
        );
        self
    }

    /// Build the final `Hand`.
    pub fn build(self) -> Hand {
        let (sx, sy) = self.frame_size.unwrap_or((1.0, 1.0));
        let mirror = self.mirror;
        Hand::new(
            self.joints
                .into_iter()
                .map(|j| {
                    let x = j.x / sx;
                    let x = if mirror { 1.0 - x } else { x };
                    Joint::new(x, j.y / sy, j.z)
                })
                .collect(),
        )
    }
}
