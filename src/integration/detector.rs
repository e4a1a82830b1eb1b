//! Trait for hand landmark inference backends.

use crate::tracker::FrameHands;

/// Trait for hand landmark inference backends.
///
/// Implement this trait to connect any hand pose model to the loop tracker.
///
/// # Example
///
/// ```ignore
/// use handloop_rs::{FrameHands, HandSource};
///
/// struct MyLandmarker {
///     // Your model here
/// }
///
/// impl HandSource for MyLandmarker {
///     type Error = std::io::Error;
///
///     fn detect(
///         &mut self,
///         input: &[u8],
///         width: u32,
///         height: u32,
///         timestamp_us: u64,
///     ) -> Result<FrameHands, Self::Error> {
///         // Run inference and return normalized landmarks
///         Ok(FrameHands::default())
///     }
/// }
/// ```
pub trait HandSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on one video frame.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes (format depends on implementation)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `timestamp_us` - Frame time in microseconds, strictly increasing
    ///
    /// # Returns
    /// The detected hands with joints normalized to `[0, 1]`, or an error.
    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
        timestamp_us: u64,
    ) -> Result<FrameHands, Self::Error>;
}
