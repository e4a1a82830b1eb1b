//! LoopPipeline for combining hand detection with loop tracking.

use tracing::trace;

use crate::error::ConfigError;
use crate::tracker::{HandSmoother, LoopTracker, TrackedLoop, TrackerConfig};

use super::HandSource;

/// Drives one video stream: detection, optional smoothing, loop extraction
/// and tracking, once per delivered frame.
///
/// Frames must be fed one at a time, in delivery order.
pub struct LoopPipeline<D: HandSource> {
    detector: D,
    tracker: LoopTracker,
    smoother: Option<HandSmoother>,
    last_timestamp_us: u64,
}

impl<D: HandSource> LoopPipeline<D> {
    /// Create a new pipeline with the given detector and tracker config.
    pub fn new(detector: D, config: TrackerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            detector,
            tracker: LoopTracker::new(config)?,
            smoother: None,
            last_timestamp_us: 0,
        })
    }

    /// Create a new pipeline with default tracker configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self {
            detector,
            tracker: LoopTracker::default(),
            smoother: None,
            last_timestamp_us: 0,
        }
    }

    /// Smooth landmarks across frames before extracting loops.
    pub fn with_smoothing(mut self, smoother: HandSmoother) -> Self {
        self.smoother = Some(smoother);
        self
    }

    /// Process a single frame and return the tracked loops.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `now_ms` - Presentation time of the frame in milliseconds
    ///
    /// # Returns
    /// The tracked loop set after this frame, or a detection error. On error
    /// the tracker is left as it was.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
        now_ms: f64,
    ) -> Result<&[TrackedLoop], D::Error> {
        let timestamp_us = self.next_timestamp(now_ms);
        let hands = self.detector.detect(input, width, height, timestamp_us)?;
        let hands = match self.smoother.as_mut() {
            Some(smoother) => smoother.smooth(&hands),
            None => hands,
        };
        trace!(timestamp_us, hands = hands.len(), "frame detected");
        Ok(self.tracker.process(&hands))
    }

    /// Detector timestamps must strictly increase even when the video clock
    /// stalls or repeats.
    fn next_timestamp(&mut self, now_ms: f64) -> u64 {
        let mut timestamp = (now_ms * 1000.0).max(0.0) as u64;
        if timestamp <= self.last_timestamp_us {
            timestamp = self.last_timestamp_us + 1;
        }
        self.last_timestamp_us = timestamp;
        timestamp
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &LoopTracker {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut LoopTracker {
        &mut self.tracker
    }
}
