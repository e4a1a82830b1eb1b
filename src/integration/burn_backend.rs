//! Burn inference backend for hand landmark detection.
//!
//! This module provides a `BurnHandDetector` that implements `HandSource`
//! for running hand landmark models built with the Burn framework.
//!
//! # Example
//!
//! ```ignore
//! use handloop_rs::integration::{BurnHandDetector, BurnHandModel, RawHand};
//! use burn::backend::NdArray;
//!
//! // Implement BurnHandModel for your landmark model
//! struct MyLandmarker { /* ... */ }
//!
//! impl BurnHandModel<NdArray> for MyLandmarker {
//!     fn forward(&self, input: burn::tensor::Tensor<NdArray, 4>) -> Vec<RawHand> {
//!         // Run inference
//!     }
//! }
//!
//! let model = MyLandmarker::load("hand_landmarker.bin");
//! let detector = BurnHandDetector::new(model, Default::default());
//! ```

use super::{HandBuilder, HandSource};
use crate::tracker::{FrameHands, JOINTS_PER_HAND};
use burn::prelude::*;
use burn::tensor::Tensor;
use thiserror::Error;

/// Error type for Burn detection failures.
#[derive(Debug, Clone, Error)]
pub enum BurnDetectorError {
    /// Input image has invalid dimensions.
    #[error("Invalid input dimensions: expected {expected:?}, got {got:?}")]
    InvalidInputDimensions {
        expected: (u32, u32, u32),
        got: (u32, u32, u32),
    },
    /// Preprocessing failed.
    #[error("Preprocessing error: {0}")]
    PreprocessingError(String),
}

/// Raw hand output from the model.
#[derive(Debug, Clone)]
pub struct RawHand {
    /// Flat `[x, y, z]` triples, one per joint, in model input pixels
    pub landmarks: Vec<f32>,
    /// Hand presence score
    pub score: f32,
}

/// Trait for Burn-based hand landmark models.
///
/// Implement this trait for your specific model architecture.
pub trait BurnHandModel<B: Backend>: Send + Sync {
    /// Run forward pass on the input tensor.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape [batch, channels, height, width]
    ///
    /// # Returns
    /// Vector of detected hands, landmarks in input pixel coordinates.
    fn forward(&self, input: Tensor<B, 4>) -> Vec<RawHand>;

    /// Get the expected input size (channels, height, width).
    fn input_size(&self) -> (u32, u32, u32) {
        (3, 224, 224)
    }
}

/// Burn-based hand detector implementing `HandSource`.
pub struct BurnHandDetector<B: Backend, M: BurnHandModel<B>> {
    model: M,
    device: B::Device,
    score_threshold: f32,
    max_hands: usize,
}

impl<B: Backend, M: BurnHandModel<B>> BurnHandDetector<B, M> {
    /// Create a new Burn detector with the given model and device.
    pub fn new(model: M, device: B::Device) -> Self {
        Self {
            model,
            device,
            score_threshold: 0.5,
            max_hands: 2,
        }
    }

    /// Set the hand presence threshold.
    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Keep at most this many hands per frame.
    pub fn with_max_hands(mut self, max_hands: usize) -> Self {
        self.max_hands = max_hands;
        self
    }

    /// Preprocess raw RGB bytes to a Burn tensor.
    pub fn preprocess(
        &self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Tensor<B, 4>, BurnDetectorError> {
        let (channels, target_h, target_w) = self.model.input_size();
        let (w, h, c) = (width as usize, height as usize, channels as usize);
        let expected_len = w.checked_mul(h).and_then(|n| n.checked_mul(c)).ok_or_else(|| {
            BurnDetectorError::PreprocessingError(format!(
                "Input size {width}x{height}x{channels} overflows"
            ))
        })?;

        if input.len() != expected_len {
            let row = h.saturating_mul(c).max(1);
            let got_width = u32::try_from(input.len() / row).unwrap_or(u32::MAX);
            return Err(BurnDetectorError::InvalidInputDimensions {
                expected: (channels, height, width),
                got: (channels, height, got_width),
            });
        }

        if height != target_h || width != target_w {
            return Err(BurnDetectorError::PreprocessingError(format!(
                "Input size {width}x{height} doesn't match model size {target_w}x{target_h}"
            )));
        }

        let data: Vec<f32> = input.iter().map(|&x| x as f32 / 255.0).collect();
        let tensor = Tensor::<B, 1>::from_floats(data.as_slice(), &self.device).reshape([1, c, h, w]);
        Ok(tensor)
    }

    /// Convert raw model outputs to normalized hands.
    ///
    /// Hands below the score threshold or with too few landmarks are dropped.
    /// When more than `max_hands` remain, the best-scoring ones are kept.
    /// Survivors stay in the model's output order, which fixes their flat
    /// joint offsets.
    fn postprocess(&self, raw_hands: Vec<RawHand>) -> FrameHands {
        let (_, h, w) = self.model.input_size();
        let mut kept: Vec<(usize, RawHand)> = raw_hands
            .into_iter()
            .enumerate()
            .filter(|(_, hand)| {
                hand.score >= self.score_threshold && hand.landmarks.len() >= JOINTS_PER_HAND * 3
            })
            .collect();
        if kept.len() > self.max_hands {
            kept.sort_by(|(_, a), (_, b)| b.score.total_cmp(&a.score));
            kept.truncate(self.max_hands);
            kept.sort_by_key(|(order, _)| *order);
        }
        kept.into_iter()
            .map(|(_, hand)| {
                HandBuilder::new()
                    .frame_size(w, h)
                    .xyz(&hand.landmarks[..JOINTS_PER_HAND * 3])
                    .build()
            })
            .collect::<Vec<_>>()
            .into()
    }
}

impl<B: Backend, M: BurnHandModel<B>> HandSource for BurnHandDetector<B, M> {
    type Error = BurnDetectorError;

    fn detect(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
        _timestamp_us: u64,
    ) -> Result<FrameHands, Self::Error> {
        let tensor = self.preprocess(input, width, height)?;
        let raw_hands = self.model.forward(tensor);
        Ok(self.postprocess(raw_hands))
    }
}
