#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod suppression;
pub mod types;

// Algorithm stages, public for tools and tests.
pub mod edges;
pub mod hough;
pub mod preprocess;
pub mod threshold;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{
    DetectorOptions, FeedbackSample, PlaqueDetector, MIN_TRAINING_SAMPLES,
};
pub use crate::diagnostics::DetectionReport;
pub use crate::error::DetectionError;
pub use crate::image::PixelBuffer;
pub use crate::suppression::{suppress, OverlapMetric, SuppressionOptions};
pub use crate::types::{Detection, DetectionParams, CONTOUR_CONFIDENCE, HOUGH_CONFIDENCE};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use plaque_detector::prelude::*;
///
/// # fn main() -> Result<(), DetectionError> {
/// let (w, h) = (200usize, 200usize);
/// let gray = vec![180u8; w * h];
/// let img = PixelBuffer::Gray(ImageU8::new(w, h, &gray));
///
/// let det = PlaqueDetector::default();
/// let plaques = det.detect(&img, None)?;
/// println!("plaques={}", plaques.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageRgb8, ImageU8};
    pub use crate::{Detection, DetectionError, DetectionParams, PixelBuffer, PlaqueDetector};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::hough::detect_circles;
    pub use crate::preprocess::{preprocess, PreprocessOptions};
    pub use crate::threshold::{
        binary_mask, detect_by_threshold, detect_by_threshold_with, ThresholdOptions,
    };
}
