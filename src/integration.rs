//! Integration module for connecting hand landmark backends and downstream
//! consumers with the loop tracker.
//!
//! This module provides the detector trait and frame pipeline that feed the
//! tracker, and the bubble seeding and overlay helpers that consume its
//! output.

mod bubbles;
mod builder;
mod detector;
mod overlay;
mod pipeline;

pub use bubbles::{BubbleSeed, BubbleSpawner, MAX_BUBBLES_PER_VOLUME};
pub use builder::HandBuilder;
pub use detector::HandSource;
pub use overlay::{OverlayShape, overlay_shapes, palette_hue};
pub use pipeline::LoopPipeline;

#[cfg(feature = "burn-backend")]
mod burn_backend;

#[cfg(feature = "burn-backend")]
pub use burn_backend::{BurnDetectorError, BurnHandDetector, BurnHandModel, RawHand};
