//! Error types.

use thiserror::Error;

/// Rejected tracker or pipeline configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A distance threshold must be finite and strictly positive.
    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    /// Minimum loop area must be finite and not negative.
    #[error("min_area must be finite and non-negative, got {0}")]
    NegativeArea(f32),
    /// At least one observed frame is needed before a loop can be confirmed.
    #[error("confirmation_threshold must be at least 1")]
    ZeroConfirmation,
    /// Smoothing weights outside `[0, 1)` would freeze or invert the signal.
    #[error("smoothing factor must be in [0, 1), got {0}")]
    SmoothingFactor(f32),
}

pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
