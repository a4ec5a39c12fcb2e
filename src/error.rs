//! Error taxonomy returned by the detection service.
use thiserror::Error;

/// Failures surfaced synchronously by [`PlaqueDetector`](crate::PlaqueDetector).
///
/// An empty detection list is never an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DetectionError {
    /// The pixel buffer is missing, empty, zero-sized, or could not be decoded.
    #[error("could not load image: {0}")]
    ImageLoad(String),
    /// Parameters that would make the radius/area filters vacuous or inverted.
    #[error("invalid detection parameters: {0}")]
    InvalidParameters(String),
    /// Too few feedback samples to bump the model version.
    #[error("insufficient training data: {available} usable samples, need at least {required}")]
    InsufficientData { available: usize, required: usize },
}
