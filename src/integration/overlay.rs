//! 2-D overlay description of tracked loops for canvas-style renderers.

use crate::tracker::{LoopState, TrackedLoop};

/// One loop ready to stroke onto a frame-sized canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayShape {
    /// Closed outline in pixel coordinates
    pub outline: Vec<[f32; 2]>,
    /// Palette hue in degrees
    pub hue: f32,
    pub alpha: f32,
    /// Id text, only for confirmed loops
    pub label: Option<String>,
    /// Label anchor (the loop centroid) in pixel coordinates
    pub label_at: [f32; 2],
}

/// Evenly spaced hue for `id` on a palette of `palette_size` colors.
pub fn palette_hue(id: u64, palette_size: u32) -> f32 {
    let n = u64::from(palette_size.max(1));
    (id % n) as f32 * 360.0 / n as f32
}

/// Map tracked loops to pixel-space overlay shapes. Loops within their
/// missing-frame grace period are drawn dimmer.
pub fn overlay_shapes(
    loops: &[TrackedLoop],
    width: u32,
    height: u32,
    palette_size: u32,
) -> Vec<OverlayShape> {
    let (w, h) = (width as f32, height as f32);
    loops
        .iter()
        .map(|lp| OverlayShape {
            outline: lp.points.iter().map(|p| [p.x * w, p.y * h]).collect(),
            hue: palette_hue(lp.id.unwrap_or(0), palette_size),
            alpha: if lp.state() == LoopState::Missing {
                0.2
            } else {
                0.33
            },
            label: lp.id.filter(|_| lp.confirmed).map(|id| id.to_string()),
            label_at: [lp.center.x * w, lp.center.y * h],
        })
        .collect()
}
