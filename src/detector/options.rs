//! Options fixed for the lifetime of a [`PlaqueDetector`](super::PlaqueDetector).
//!
//! Per-call knobs live in [`DetectionParams`](crate::DetectionParams); these
//! cover preprocessing, the contour detector's binarisation and suppression.
//! Everything deserialises with defaults so a JSON config may name only the
//! fields it changes.

use crate::error::DetectionError;
use crate::preprocess::PreprocessOptions;
use crate::suppression::SuppressionOptions;
use crate::threshold::ThresholdOptions;
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DetectorOptions {
    pub preprocess: PreprocessOptions,
    pub threshold: ThresholdOptions,
    pub suppression: SuppressionOptions,
}

impl DetectorOptions {
    pub fn validate(&self) -> Result<(), DetectionError> {
        self.preprocess.validate()?;
        self.threshold.validate()?;
        let t = self.suppression.overlap_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(DetectionError::InvalidParameters(format!(
                "overlap_threshold must lie in [0, 1], got {t}"
            )));
        }
        Ok(())
    }
}
